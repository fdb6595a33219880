// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for message delivery

use crate::id::ReceiverId;
use thiserror::Error;

/// Error a receiver handler may return from `on_message_sent`
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One handler that failed during an emission
#[derive(Debug)]
pub struct HandlerFailure {
    pub receiver: ReceiverId,
    pub error: HandlerError,
}

/// Returned by an emission when at least one handler failed.
///
/// Every registered handler was still notified; the failures are listed in
/// registration order.
#[derive(Debug, Error)]
#[error("{} handler(s) failed while delivering a message{}", .failures.len(), first_error(.failures))]
pub struct DeliveryError {
    failures: Vec<HandlerFailure>,
}

impl DeliveryError {
    /// `Ok(())` for an empty failure list, the aggregated error otherwise
    pub(crate) fn check(failures: Vec<HandlerFailure>) -> Result<(), Self> {
        if failures.is_empty() {
            Ok(())
        } else {
            Err(Self { failures })
        }
    }

    pub fn failures(&self) -> &[HandlerFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<HandlerFailure> {
        self.failures
    }
}

fn first_error(failures: &[HandlerFailure]) -> String {
    failures
        .first()
        .map(|f| format!("; first: {}", f.error))
        .unwrap_or_default()
}
