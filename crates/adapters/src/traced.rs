// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing integration: a logging receiver and traced wrappers

use crate::config::ReceiverConfig;
use mb_core::{Forwarder, HandlerError, Message, MessageReceiver, RelayHandler, SenderRef};
use std::time::Instant;

/// Emit a tracing event at a level only known at runtime
macro_rules! event_at {
    ($level:expr, $($arg:tt)+) => {
        match $level {
            tracing::Level::TRACE => tracing::trace!($($arg)+),
            tracing::Level::DEBUG => tracing::debug!($($arg)+),
            tracing::Level::INFO => tracing::info!($($arg)+),
            tracing::Level::WARN => tracing::warn!($($arg)+),
            _ => tracing::error!($($arg)+),
        }
    };
}

/// Receiver that logs every message through `tracing`.
///
/// The message level picks the tracing level (FATAL logs as ERROR); the
/// original level is kept in the `level` field.
#[derive(Debug, Clone, Default)]
pub struct TracingReceiver {
    config: ReceiverConfig,
}

impl TracingReceiver {
    pub fn new(config: ReceiverConfig) -> Self {
        Self { config }
    }
}

impl MessageReceiver for TracingReceiver {
    fn on_message_sent(&self, sender: &SenderRef, message: &Message) -> Result<(), HandlerError> {
        let cause = match message.cause() {
            Some(cause) if self.config.include_cause => Some(cause.to_string()),
            _ => None,
        };
        event_at!(
            message.level().to_tracing_level(),
            receiver = %self.config.name,
            sender = %sender,
            level = %message.level(),
            cause = cause.as_deref(),
            "{}",
            message.text()
        );
        Ok(())
    }
}

/// Wrapper that adds tracing to any MessageReceiver
#[derive(Debug, Clone)]
pub struct TracedReceiver<R> {
    inner: R,
}

impl<R> TracedReceiver<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: MessageReceiver> MessageReceiver for TracedReceiver<R> {
    fn on_message_sent(&self, sender: &SenderRef, message: &Message) -> Result<(), HandlerError> {
        let span = tracing::debug_span!("receiver.on_message_sent", sender = %sender, level = %message.level());
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.inner.on_message_sent(sender, message);
        let elapsed_us = start.elapsed().as_micros() as u64;

        match &result {
            Ok(()) => tracing::trace!(elapsed_us, "handled"),
            Err(e) => tracing::error!(elapsed_us, error = %e, "handler failed"),
        }

        result
    }
}

/// Wrapper that adds tracing to any RelayHandler
#[derive(Debug, Clone)]
pub struct TracedRelayHandler<H> {
    inner: H,
}

impl<H> TracedRelayHandler<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: RelayHandler> RelayHandler for TracedRelayHandler<H> {
    fn on_message_sent(
        &self,
        relay: &Forwarder<'_>,
        sender: &SenderRef,
        message: &Message,
    ) -> Result<(), HandlerError> {
        let span = tracing::debug_span!(
            "relay.on_message_sent",
            relay = %relay.as_ref(),
            sender = %sender,
            level = %message.level()
        );
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.inner.on_message_sent(relay, sender, message);
        let elapsed_us = start.elapsed().as_micros() as u64;

        match &result {
            Ok(()) => tracing::trace!(elapsed_us, "relayed"),
            // Downstream failures come back through here too
            Err(e) => tracing::warn!(elapsed_us, error = %e, "relay handler failed"),
        }

        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
