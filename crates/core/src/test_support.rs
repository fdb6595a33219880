// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recording handlers shared by the unit tests

use crate::{HandlerError, Message, MessageReceiver, SenderRef};
use std::sync::{Arc, Mutex};

/// One observed delivery
#[derive(Clone, Debug)]
pub(crate) struct Delivery {
    pub tag: &'static str,
    pub sender: SenderRef,
    pub message: Message,
}

/// Deliveries observed by every handler sharing it, in call order
pub(crate) type Log = Arc<Mutex<Vec<Delivery>>>;

pub(crate) fn new_log() -> Log {
    Arc::default()
}

pub(crate) fn tags(log: &Log) -> Vec<&'static str> {
    log.lock().unwrap().iter().map(|d| d.tag).collect()
}

pub(crate) fn deliveries(log: &Log) -> Vec<Delivery> {
    log.lock().unwrap().clone()
}

/// Handler that records each delivery under `tag`
pub(crate) fn recorder(log: &Log, tag: &'static str) -> impl MessageReceiver {
    let log = Arc::clone(log);
    move |sender: &SenderRef, message: &Message| -> Result<(), HandlerError> {
        log.lock().unwrap().push(Delivery {
            tag,
            sender: sender.clone(),
            message: message.clone(),
        });
        Ok(())
    }
}

/// Handler that records each delivery, then fails with `reason`
pub(crate) fn failing(log: &Log, tag: &'static str, reason: &'static str) -> impl MessageReceiver {
    let log = Arc::clone(log);
    move |sender: &SenderRef, message: &Message| -> Result<(), HandlerError> {
        log.lock().unwrap().push(Delivery {
            tag,
            sender: sender.clone(),
            message: message.clone(),
        });
        Err(reason.into())
    }
}

/// A writer that captures log output for testing
#[derive(Clone, Default)]
pub(crate) struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with tracing output captured at TRACE level
pub(crate) fn with_tracing<T>(f: impl FnOnce() -> T) -> (String, T) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs.clone())
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (logs.contents(), result)
}
