// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Receiver and harness configuration
//!
//! Loaded from TOML. Every key is optional:
//!
//! ```toml
//! default_level = "warn"   # or an integer, 0 (TRACE) to 5 (FATAL)
//! relays = 2
//!
//! [receiver]
//! name = "console"
//! include_cause = true
//! show_sender = false
//! ```

use crate::forward::MAX_RELAYS;
use mb_core::MessageLevel;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: relays = {relays} exceeds the maximum of {max}")]
    TooManyRelays { relays: usize, max: usize },
}

/// How a built-in receiver presents the messages it gets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReceiverConfig {
    /// Label in front of every console line, and the `receiver` log field
    pub name: String,
    /// Also report the error linked to a message
    pub include_cause: bool,
    /// Also report which sender produced the message
    pub show_sender: bool,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            name: "receiver".to_string(),
            include_cause: true,
            show_sender: false,
        }
    }
}

impl ReceiverConfig {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Top-level configuration for a sender → relays → receiver setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BroadcastConfig {
    /// Level used when the caller does not pick one
    pub default_level: MessageLevel,
    /// Number of forwarding relays between the sender and the receiver, at
    /// most [`MAX_RELAYS`]
    pub relays: usize,
    pub receiver: ReceiverConfig,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            default_level: MessageLevel::INFO,
            relays: 1,
            receiver: ReceiverConfig::default(),
        }
    }
}

impl BroadcastConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.relays > MAX_RELAYS {
            return Err(ConfigError::TooManyRelays {
                relays: self.relays,
                max: MAX_RELAYS,
            });
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), relays = config.relays, "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
