// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forwarding relays

use mb_core::{Forwarder, HandlerError, Message, Relay, RelayHandler, SenderRef};

/// Relay handler that forwards every inbound message unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardAll;

impl RelayHandler for ForwardAll {
    fn on_message_sent(
        &self,
        relay: &Forwarder<'_>,
        sender: &SenderRef,
        message: &Message,
    ) -> Result<(), HandlerError> {
        relay.forward_message(sender, message)?;
        Ok(())
    }
}

/// Longest chain `relay_chain` is meant to build. Each hop nests one more
/// synchronous delivery on the emitting thread's stack.
pub const MAX_RELAYS: usize = 64;

pub type ForwardingRelay = Relay<ForwardAll>;

pub fn forwarding_relay() -> ForwardingRelay {
    Relay::new(ForwardAll)
}

/// Build `hops` forwarding relays, each subscribed to the one before it and
/// the first subscribed to `origin`.
///
/// Subscribe the final receiver to the last relay (or to `origin` when
/// `hops` is zero). Config and command-line input is checked against
/// [`MAX_RELAYS`] before it gets here.
pub fn relay_chain<S: AsRef<SenderRef> + ?Sized>(origin: &S, hops: usize) -> Vec<ForwardingRelay> {
    let mut chain: Vec<ForwardingRelay> = Vec::with_capacity(hops.min(MAX_RELAYS));
    for _ in 0..hops {
        let relay = forwarding_relay();
        match chain.last() {
            Some(previous) => relay.subscribe_to_messages_from(previous),
            None => relay.subscribe_to_messages_from(origin),
        }
        chain.push(relay);
    }
    tracing::debug!(hops, "built relay chain");
    chain
}

#[cfg(test)]
#[path = "forward_tests.rs"]
mod tests;
