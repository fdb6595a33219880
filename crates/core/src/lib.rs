// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mb-core: in-process message broadcasting
//!
//! This crate provides:
//! - `Message` and `MessageLevel` - leveled text messages with an optional cause
//! - `Sender` - emits messages to every subscribed receiver, synchronously
//! - `Receiver` - subscribes to senders and handles what they emit
//! - `Relay` - receives from upstream senders and forwards to its own
//!   subscribers, keeping the original sender
//!
//! Delivery runs on the caller's stack, in subscription order. A failing
//! handler does not stop the others; the emit returns a `DeliveryError`
//! listing every failure.

pub mod error;
pub mod id;
pub mod level;
pub mod message;
pub mod receiver;
pub mod relay;
pub mod sender;

pub use error::{DeliveryError, HandlerError, HandlerFailure};
pub use id::{ReceiverId, SenderId};
pub use level::{MessageLevel, ParseLevelError};
pub use message::{Cause, Message};
pub use receiver::{MessageReceiver, Receiver};
pub use relay::{Forwarder, Relay, RelayHandler};
pub use sender::{MessageSender, Sender, SenderRef};

#[cfg(test)]
mod test_support;
