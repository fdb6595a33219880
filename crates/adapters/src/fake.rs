// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake receivers and relays for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use mb_core::{
    Forwarder, HandlerError, Message, MessageLevel, MessageReceiver, RelayHandler, SenderRef,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Recorded delivery
#[derive(Debug, Clone)]
pub struct ReceivedCall {
    pub sender: SenderRef,
    pub level: MessageLevel,
    pub text: String,
    pub cause: Option<String>,
}

type Calls = Arc<Mutex<Vec<ReceivedCall>>>;

fn record(calls: &Calls, sender: &SenderRef, message: &Message) {
    calls
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .push(ReceivedCall {
            sender: sender.clone(),
            level: message.level(),
            text: message.text().to_string(),
            cause: message.cause().map(|c| c.to_string()),
        });
}

/// Fake receiver that records every message it gets.
///
/// Clones share the same record, so a test can keep one clone while a
/// `Receiver` owns another.
#[derive(Clone, Default)]
pub struct FakeReceiver {
    calls: Calls,
    failure: Arc<Mutex<Option<String>>>,
}

impl FakeReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded deliveries
    pub fn calls(&self) -> Vec<ReceivedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.text).collect()
    }

    pub fn message_received(&self) -> bool {
        !self.calls.lock().unwrap_or_else(|e| e.into_inner()).is_empty()
    }

    /// Make every following delivery fail with `reason` (after recording it)
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(reason.into());
    }
}

impl MessageReceiver for FakeReceiver {
    fn on_message_sent(&self, sender: &SenderRef, message: &Message) -> Result<(), HandlerError> {
        record(&self.calls, sender, message);
        match self.failure.lock().unwrap_or_else(|e| e.into_inner()).clone() {
            Some(reason) => Err(reason.into()),
            None => Ok(()),
        }
    }
}

/// Fake relay handler that records every message and, unless silent,
/// forwards it
#[derive(Clone)]
pub struct FakeRelay {
    calls: Calls,
    forward: bool,
}

impl FakeRelay {
    pub fn new() -> Self {
        Self {
            calls: Calls::default(),
            forward: true,
        }
    }

    /// A relay that records but never forwards
    pub fn silent() -> Self {
        Self {
            calls: Calls::default(),
            forward: false,
        }
    }

    pub fn calls(&self) -> Vec<ReceivedCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn message_received(&self) -> bool {
        !self.calls.lock().unwrap_or_else(|e| e.into_inner()).is_empty()
    }
}

impl Default for FakeRelay {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayHandler for FakeRelay {
    fn on_message_sent(
        &self,
        relay: &Forwarder<'_>,
        sender: &SenderRef,
        message: &Message,
    ) -> Result<(), HandlerError> {
        record(&self.calls, sender, message);
        if self.forward {
            relay.forward_message(sender, message)?;
        }
        Ok(())
    }
}

/// In-memory writer whose clones share one buffer
#[derive(Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).to_string()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
