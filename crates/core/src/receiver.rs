// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Receiver capability: subscription bookkeeping and teardown

use crate::error::HandlerError;
use crate::id::ReceiverId;
use crate::message::Message;
use crate::sender::{Deliver, SenderRef};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Reacts to messages from the senders a [`Receiver`] is subscribed to.
///
/// Called synchronously from inside the sender's emit, once per
/// registration. An `Err` is reported back to the emitting caller; the
/// remaining receivers are still notified.
pub trait MessageReceiver: Send + Sync + 'static {
    fn on_message_sent(&self, sender: &SenderRef, message: &Message) -> Result<(), HandlerError>;
}

impl<F> MessageReceiver for F
where
    F: Fn(&SenderRef, &Message) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn on_message_sent(&self, sender: &SenderRef, message: &Message) -> Result<(), HandlerError> {
        self(sender, message)
    }
}

/// Ordered list of the senders a receiver is attached to.
///
/// Mirrors the receiver's registrations on those senders' channels: a
/// sender appears here once per registration.
pub(crate) struct Subscriptions {
    owner: ReceiverId,
    senders: Mutex<Vec<SenderRef>>,
}

impl Subscriptions {
    pub(crate) fn new() -> Self {
        Self {
            owner: ReceiverId::generate(),
            senders: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn owner(&self) -> ReceiverId {
        self.owner
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SenderRef>> {
        self.senders.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn subscribe(&self, sender: &SenderRef, target: Weak<dyn Deliver>) {
        let mut senders = self.lock();
        sender.register(self.owner, target);
        senders.push(sender.clone());
        tracing::debug!(
            sender = %sender.id(),
            receiver = %self.owner,
            registrations = senders.iter().filter(|s| *s == sender).count(),
            "subscribed"
        );
    }

    pub(crate) fn unsubscribe(&self, sender: &SenderRef) {
        let mut senders = self.lock();
        let Some(index) = senders.iter().position(|s| s == sender) else {
            tracing::trace!(sender = %sender.id(), receiver = %self.owner, "not subscribed");
            return;
        };
        senders.remove(index);
        sender.deregister(self.owner);
        tracing::debug!(sender = %sender.id(), receiver = %self.owner, "unsubscribed");
    }

    /// Drop every registration. Safe to call any number of times.
    pub(crate) fn dispose(&self) {
        let senders = std::mem::take(&mut *self.lock());
        if senders.is_empty() {
            return;
        }
        for sender in &senders {
            sender.deregister(self.owner);
        }
        tracing::debug!(receiver = %self.owner, released = senders.len(), "disposed");
    }

    pub(crate) fn senders(&self) -> Vec<SenderRef> {
        self.lock().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    pub(crate) fn contains(&self, sender: &SenderRef) -> bool {
        self.lock().iter().any(|s| s == sender)
    }
}

struct ReceiverInner<R> {
    handler: R,
    subscriptions: Subscriptions,
}

impl<R: MessageReceiver> Deliver for ReceiverInner<R> {
    fn deliver(&self, sender: &SenderRef, message: &Message) -> Result<(), HandlerError> {
        self.handler.on_message_sent(sender, message)
    }
}

/// Owning handle for a message receiver.
///
/// Subscribing twice to the same sender registers the handler twice, so
/// each emission from that sender is delivered twice. Dropping the handle
/// disposes it.
pub struct Receiver<R: MessageReceiver> {
    inner: Arc<ReceiverInner<R>>,
}

impl<R: MessageReceiver> Receiver<R> {
    pub fn new(handler: R) -> Self {
        Self {
            inner: Arc::new(ReceiverInner {
                handler,
                subscriptions: Subscriptions::new(),
            }),
        }
    }

    pub fn id(&self) -> ReceiverId {
        self.inner.subscriptions.owner()
    }

    pub fn handler(&self) -> &R {
        &self.inner.handler
    }

    /// Start receiving the messages `sender` emits
    pub fn subscribe_to_messages_from<S: AsRef<SenderRef> + ?Sized>(&self, sender: &S) {
        let target: Weak<ReceiverInner<R>> = Arc::downgrade(&self.inner);
        self.inner
            .subscriptions
            .subscribe(sender.as_ref(), target);
    }

    /// Remove one subscription to `sender`; no-op if there is none
    pub fn unsubscribe_to_messages_from<S: AsRef<SenderRef> + ?Sized>(&self, sender: &S) {
        self.inner.subscriptions.unsubscribe(sender.as_ref());
    }

    /// Unsubscribe from every sender. Idempotent.
    pub fn dispose(&self) {
        self.inner.subscriptions.dispose();
    }

    pub fn subscriptions(&self) -> Vec<SenderRef> {
        self.inner.subscriptions.senders()
    }

    pub fn subscription_count(&self) -> usize {
        self.inner.subscriptions.len()
    }

    pub fn is_subscribed_to<S: AsRef<SenderRef> + ?Sized>(&self, sender: &S) -> bool {
        self.inner.subscriptions.contains(sender.as_ref())
    }
}

impl<R: MessageReceiver> Drop for Receiver<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "receiver_tests.rs"]
mod tests;
