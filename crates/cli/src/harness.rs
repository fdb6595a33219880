// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring for one run: sender, relay chain, receiver

use mb_adapters::{relay_chain, BroadcastConfig, TracedReceiver};
use mb_core::{DeliveryError, MessageLevel, MessageReceiver, MessageSender, Receiver, Sender, SenderId};
use std::fmt;

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub origin: SenderId,
    pub sent: usize,
    pub relays: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sent {} message(s) from {} through {} relay(s)",
            self.sent, self.origin, self.relays
        )
    }
}

/// Emit every text at `level` from a fresh sender, through `config.relays`
/// forwarding relays, into `sink`.
///
/// Stops at the first emission that fails; everything is disposed either way.
pub fn broadcast<R: MessageReceiver>(
    config: &BroadcastConfig,
    level: MessageLevel,
    texts: &[String],
    sink: R,
) -> Result<Summary, DeliveryError> {
    let origin = Sender::new();
    let chain = relay_chain(&origin, config.relays);
    let receiver = Receiver::new(TracedReceiver::new(sink));
    match chain.last() {
        Some(last) => receiver.subscribe_to_messages_from(last),
        None => receiver.subscribe_to_messages_from(&origin),
    }

    let mut sent = 0;
    let outcome: Result<(), DeliveryError> = texts.iter().try_for_each(|text| {
        origin.send_message(level, text)?;
        sent += 1;
        Ok(())
    });

    receiver.dispose();
    for relay in &chain {
        relay.dispose();
    }
    outcome?;

    tracing::debug!(origin = %origin.id(), sent, "broadcast finished");
    Ok(Summary {
        origin: origin.id(),
        sent,
        relays: chain.len(),
    })
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
