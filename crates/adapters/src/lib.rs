// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Ready-made receivers and relays: console output, tracing, forwarding

pub mod config;
pub mod console;
pub mod forward;
pub mod traced;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use config::{BroadcastConfig, ConfigError, ReceiverConfig};
pub use console::ConsoleReceiver;
pub use forward::{forwarding_relay, relay_chain, ForwardAll, ForwardingRelay, MAX_RELAYS};
pub use traced::{TracedReceiver, TracedRelayHandler, TracingReceiver};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeReceiver, FakeRelay, ReceivedCall, SharedBuffer};
