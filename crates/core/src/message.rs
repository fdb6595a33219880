// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Broadcast message value

use crate::level::MessageLevel;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Error attached to a message as its cause.
///
/// Shared so one message can be handed to any number of receivers.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// An immutable leveled text message, optionally linked to an error
#[derive(Clone, Debug)]
pub struct Message {
    level: MessageLevel,
    text: String,
    cause: Option<Cause>,
}

impl Message {
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            cause: None,
        }
    }

    pub fn with_cause(level: MessageLevel, text: impl Into<String>, cause: Cause) -> Self {
        Self {
            level,
            text: text.into(),
            cause: Some(cause),
        }
    }

    pub fn level(&self) -> MessageLevel {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Shared handle to the cause, for receivers that keep it around
    pub fn cause_handle(&self) -> Option<Cause> {
        self.cause.clone()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level, self.text)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
