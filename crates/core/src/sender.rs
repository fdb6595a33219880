// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Sender capability: the notification channel and the emit operations
//!
//! A sender owns a channel, an ordered multiset of handler registrations.
//! Registrations are added and removed only by receivers (see
//! [`crate::Receiver`] and [`crate::Relay`]); a sender only emits.

use crate::error::{DeliveryError, HandlerError, HandlerFailure};
use crate::id::{ReceiverId, SenderId};
use crate::level::MessageLevel;
use crate::message::{Cause, Message};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock, Weak};

/// Anything a channel can hand a message to
pub(crate) trait Deliver: Send + Sync {
    fn deliver(&self, sender: &SenderRef, message: &Message) -> Result<(), HandlerError>;
}

struct Registration {
    receiver: ReceiverId,
    // Weak so a sender never keeps its receivers alive
    target: Weak<dyn Deliver>,
}

struct Channel {
    id: SenderId,
    registrations: RwLock<Vec<Registration>>,
}

/// Identity of a sender, as seen by receivers.
///
/// Cheap to clone. Two refs are equal only if they point at the same
/// channel.
#[derive(Clone)]
pub struct SenderRef {
    channel: Arc<Channel>,
}

impl SenderRef {
    pub(crate) fn new() -> Self {
        Self {
            channel: Arc::new(Channel {
                id: SenderId::generate(),
                registrations: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn id(&self) -> SenderId {
        self.channel.id
    }

    /// Number of live handler registrations (duplicates counted)
    pub fn handler_count(&self) -> usize {
        self.channel
            .registrations
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|r| r.target.strong_count() > 0)
            .count()
    }

    pub(crate) fn register(&self, receiver: ReceiverId, target: Weak<dyn Deliver>) {
        let mut registrations = self
            .channel
            .registrations
            .write()
            .unwrap_or_else(|e| e.into_inner());
        registrations.push(Registration { receiver, target });
    }

    /// Remove the first registration of `receiver`
    pub(crate) fn deregister(&self, receiver: ReceiverId) -> bool {
        let mut registrations = self
            .channel
            .registrations
            .write()
            .unwrap_or_else(|e| e.into_inner());
        match registrations.iter().position(|r| r.receiver == receiver) {
            Some(index) => {
                registrations.remove(index);
                true
            }
            None => false,
        }
    }

    /// Deliver `message` to every registered handler, in registration order,
    /// reporting `origin` as the sender.
    ///
    /// Handlers run against a snapshot of the channel with no lock held, so
    /// changes they make to the channel apply from the next emission on. A
    /// receiver dropped by an earlier handler is skipped right away, since its
    /// registration can no longer be upgraded. A failing handler does not stop
    /// delivery to the ones after it.
    pub(crate) fn emit(&self, origin: &SenderRef, message: &Message) -> Result<(), DeliveryError> {
        let snapshot: Vec<(ReceiverId, Weak<dyn Deliver>)> = self
            .channel
            .registrations
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|r| (r.receiver, Weak::clone(&r.target)))
            .collect();

        if snapshot.is_empty() {
            return Ok(());
        }

        tracing::trace!(
            sender = %self.id(),
            origin = %origin.id(),
            level = %message.level(),
            handlers = snapshot.len(),
            "emitting"
        );

        let mut failures = Vec::new();
        let mut stale = false;
        for (receiver, target) in snapshot {
            let Some(target) = target.upgrade() else {
                stale = true;
                continue;
            };
            if let Err(error) = target.deliver(origin, message) {
                tracing::warn!(
                    sender = %self.id(),
                    receiver = %receiver,
                    error = %error,
                    "handler failed"
                );
                failures.push(HandlerFailure { receiver, error });
            }
        }

        if stale {
            self.prune();
        }

        DeliveryError::check(failures)
    }

    fn prune(&self) {
        let mut registrations = self
            .channel
            .registrations
            .write()
            .unwrap_or_else(|e| e.into_inner());
        registrations.retain(|r| r.target.strong_count() > 0);
    }
}

impl PartialEq for SenderRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.channel, &other.channel)
    }
}

impl Eq for SenderRef {}

impl Hash for SenderRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.channel.id.hash(state);
    }
}

impl AsRef<SenderRef> for SenderRef {
    fn as_ref(&self) -> &SenderRef {
        self
    }
}

impl fmt::Debug for SenderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SenderRef").field(&self.channel.id).finish()
    }
}

impl fmt::Display for SenderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.channel.id, f)
    }
}

/// Something that owns a channel and can emit on it
pub trait MessageSender {
    /// This sender's identity and channel
    fn sender_ref(&self) -> &SenderRef;

    /// Broadcast a message to every subscribed receiver.
    ///
    /// A sender with no subscribers succeeds without doing anything.
    fn send_message(&self, level: MessageLevel, text: &str) -> Result<(), DeliveryError> {
        let me = self.sender_ref();
        me.emit(me, &Message::new(level, text))
    }

    /// Broadcast a message linked to the error that caused it
    fn send_message_with_cause(
        &self,
        level: MessageLevel,
        text: &str,
        cause: Cause,
    ) -> Result<(), DeliveryError> {
        let me = self.sender_ref();
        me.emit(me, &Message::with_cause(level, text, cause))
    }

    fn subscriber_count(&self) -> usize {
        self.sender_ref().handler_count()
    }
}

/// Plain message sender
#[derive(Debug)]
pub struct Sender {
    channel: SenderRef,
}

impl Sender {
    pub fn new() -> Self {
        Self {
            channel: SenderRef::new(),
        }
    }

    pub fn id(&self) -> SenderId {
        self.channel.id()
    }
}

impl Default for Sender {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSender for Sender {
    fn sender_ref(&self) -> &SenderRef {
        &self.channel
    }
}

impl AsRef<SenderRef> for Sender {
    fn as_ref(&self) -> &SenderRef {
        &self.channel
    }
}

#[cfg(test)]
#[path = "sender_tests.rs"]
mod tests;
