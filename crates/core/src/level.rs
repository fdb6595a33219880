// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Message severity levels
//!
//! Levels are plain ordered integers so they map one-to-one onto the
//! NLog scale: TRACE=0, DEBUG=1, INFO=2, WARN=3, ERROR=4, FATAL=5.
//! Values outside that range are carried verbatim.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Severity attached to every message
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageLevel(i32);

impl MessageLevel {
    pub const TRACE: Self = Self(0);
    pub const DEBUG: Self = Self(1);
    pub const INFO: Self = Self(2);
    pub const WARN: Self = Self(3);
    pub const ERROR: Self = Self(4);
    pub const FATAL: Self = Self(5);

    /// The named levels, in ascending severity
    pub const ALL: [Self; 6] = [
        Self::TRACE,
        Self::DEBUG,
        Self::INFO,
        Self::WARN,
        Self::ERROR,
        Self::FATAL,
    ];

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Upper-case name for the six named levels, `None` otherwise
    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("TRACE"),
            1 => Some("DEBUG"),
            2 => Some("INFO"),
            3 => Some("WARN"),
            4 => Some("ERROR"),
            5 => Some("FATAL"),
            _ => None,
        }
    }

    /// Closest `tracing` level. FATAL and anything above collapse to ERROR,
    /// anything below TRACE stays TRACE.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self.0 {
            i32::MIN..=0 => tracing::Level::TRACE,
            1 => tracing::Level::DEBUG,
            2 => tracing::Level::INFO,
            3 => tracing::Level::WARN,
            _ => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<i32> for MessageLevel {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<MessageLevel> for i32 {
    fn from(level: MessageLevel) -> Self {
        level.0
    }
}

impl From<tracing::Level> for MessageLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Self::TRACE,
            tracing::Level::DEBUG => Self::DEBUG,
            tracing::Level::INFO => Self::INFO,
            tracing::Level::WARN => Self::WARN,
            _ => Self::ERROR,
        }
    }
}

/// Error returned when a level string is neither a known name nor an integer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown message level: {0:?}")]
pub struct ParseLevelError(pub String);

impl FromStr for MessageLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::TRACE),
            "debug" => Ok(Self::DEBUG),
            "info" => Ok(Self::INFO),
            "warn" | "warning" => Ok(Self::WARN),
            "error" => Ok(Self::ERROR),
            "fatal" => Ok(Self::FATAL),
            _ => trimmed
                .parse::<i32>()
                .map(Self)
                .map_err(|_| ParseLevelError(s.to_string())),
        }
    }
}

impl Serialize for MessageLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0)
    }
}

/// Accepted wire forms: `2` or `"info"`
#[derive(Deserialize)]
#[serde(untagged)]
enum LevelRepr {
    Value(i32),
    Name(String),
}

impl<'de> Deserialize<'de> for MessageLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match LevelRepr::deserialize(deserializer)? {
            LevelRepr::Value(value) => Ok(Self(value)),
            LevelRepr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
#[path = "level_tests.rs"]
mod tests;
