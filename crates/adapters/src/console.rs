// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Console receiver: prints each message as one line

use crate::config::ReceiverConfig;
use mb_core::{HandlerError, Message, MessageReceiver, SenderRef};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::sync::Mutex;

/// Writes `name: [LEVEL] text` lines to any writer.
///
/// With `show_sender` the producing sender is appended as
/// ` (from sender-<id>)`; with `include_cause` a linked error is printed
/// on its own `  caused by:` line. Write errors are returned to the emitter.
pub struct ConsoleReceiver<W> {
    config: ReceiverConfig,
    out: Mutex<W>,
}

impl ConsoleReceiver<io::Stdout> {
    pub fn stdout(config: ReceiverConfig) -> Self {
        Self::new(config, io::stdout())
    }
}

impl<W: Write + Send + 'static> ConsoleReceiver<W> {
    pub fn new(config: ReceiverConfig, out: W) -> Self {
        Self {
            config,
            out: Mutex::new(out),
        }
    }

    pub fn config(&self) -> &ReceiverConfig {
        &self.config
    }

    fn format_line(&self, sender: &SenderRef, message: &Message) -> String {
        let mut line = format!(
            "{}: [{}] {}",
            self.config.name,
            message.level(),
            message.text()
        );
        if self.config.show_sender {
            // Writing to a String cannot fail
            let _ = write!(line, " (from {})", sender);
        }
        line
    }
}

impl<W: Write + Send + 'static> MessageReceiver for ConsoleReceiver<W> {
    fn on_message_sent(&self, sender: &SenderRef, message: &Message) -> Result<(), HandlerError> {
        let line = self.format_line(sender, message);
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{}", line)?;
        if self.config.include_cause {
            if let Some(cause) = message.cause() {
                writeln!(out, "  caused by: {}", cause)?;
            }
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "console_tests.rs"]
mod tests;
