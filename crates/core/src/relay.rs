// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Relay capability: a receiver that owns its own channel
//!
//! A relay is built from one sender channel and one subscription list.
//! What it does with an inbound message is up to its [`RelayHandler`];
//! nothing is forwarded unless the handler asks for it. Forwarding keeps
//! the original sender, so the end of a relay chain sees who produced a
//! message rather than the last hop.

use crate::error::{DeliveryError, HandlerError};
use crate::id::{ReceiverId, SenderId};
use crate::message::Message;
use crate::receiver::Subscriptions;
use crate::sender::{Deliver, MessageSender, SenderRef};
use std::sync::{Arc, Weak};

/// Reacts to inbound messages on behalf of a [`Relay`]
pub trait RelayHandler: Send + Sync + 'static {
    fn on_message_sent(
        &self,
        relay: &Forwarder<'_>,
        sender: &SenderRef,
        message: &Message,
    ) -> Result<(), HandlerError>;
}

/// The sending side of a relay, handed to its handler
pub struct Forwarder<'a> {
    channel: &'a SenderRef,
}

impl Forwarder<'_> {
    /// Re-emit `message` to the relay's subscribers as coming from `original`
    pub fn forward_message(
        &self,
        original: &SenderRef,
        message: &Message,
    ) -> Result<(), DeliveryError> {
        self.channel.emit(original, message)
    }
}

impl MessageSender for Forwarder<'_> {
    fn sender_ref(&self) -> &SenderRef {
        self.channel
    }
}

impl AsRef<SenderRef> for Forwarder<'_> {
    fn as_ref(&self) -> &SenderRef {
        self.channel
    }
}

struct RelayInner<H> {
    handler: H,
    channel: SenderRef,
    subscriptions: Subscriptions,
}

impl<H: RelayHandler> Deliver for RelayInner<H> {
    fn deliver(&self, sender: &SenderRef, message: &Message) -> Result<(), HandlerError> {
        let forwarder = Forwarder {
            channel: &self.channel,
        };
        self.handler.on_message_sent(&forwarder, sender, message)
    }
}

/// Owning handle for a relay: a sender and a receiver in one.
///
/// Dropping the handle disposes its subscriptions.
pub struct Relay<H: RelayHandler> {
    inner: Arc<RelayInner<H>>,
}

impl<H: RelayHandler> Relay<H> {
    pub fn new(handler: H) -> Self {
        Self {
            inner: Arc::new(RelayInner {
                handler,
                channel: SenderRef::new(),
                subscriptions: Subscriptions::new(),
            }),
        }
    }

    /// Identity of the receiving side
    pub fn id(&self) -> ReceiverId {
        self.inner.subscriptions.owner()
    }

    /// Identity of the sending side
    pub fn sender_id(&self) -> SenderId {
        self.inner.channel.id()
    }

    pub fn handler(&self) -> &H {
        &self.inner.handler
    }

    pub fn subscribe_to_messages_from<S: AsRef<SenderRef> + ?Sized>(&self, sender: &S) {
        let target: Weak<RelayInner<H>> = Arc::downgrade(&self.inner);
        self.inner
            .subscriptions
            .subscribe(sender.as_ref(), target);
    }

    pub fn unsubscribe_to_messages_from<S: AsRef<SenderRef> + ?Sized>(&self, sender: &S) {
        self.inner.subscriptions.unsubscribe(sender.as_ref());
    }

    /// Re-emit `message` to this relay's subscribers as coming from `original`
    pub fn forward_message(
        &self,
        original: &SenderRef,
        message: &Message,
    ) -> Result<(), DeliveryError> {
        self.inner.channel.emit(original, message)
    }

    /// Unsubscribe from every upstream sender. Idempotent.
    ///
    /// Downstream receivers stay subscribed to this relay.
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

impl<H: RelayHandler> MessageSender for Relay<H> {
    fn sender_ref(&self) -> &SenderRef {
        &self.inner.channel
    }
}

impl<H: RelayHandler> AsRef<SenderRef> for Relay<H> {
    fn as_ref(&self) -> &SenderRef {
        &self.inner.channel
    }
}

impl<H: RelayHandler> Drop for Relay<H> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
