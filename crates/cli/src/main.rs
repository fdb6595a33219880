// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow unwrap in test code
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! mb - broadcast messages through a relay chain to the console

mod harness;

use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use mb_adapters::{BroadcastConfig, ConsoleReceiver, MAX_RELAYS};
use mb_core::MessageLevel;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mb",
    version,
    about = "Send messages from a sender, through forwarding relays, to a console receiver"
)]
struct Cli {
    /// Config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Diagnostic log filter, written to stderr (default: RUST_LOG, else "warn")
    #[arg(long)]
    log_level: Option<String>,

    /// Number of forwarding relays between sender and receiver (at most 64)
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_RELAYS as u64))]
    relays: Option<usize>,

    /// Message level: trace, debug, info, warn, error, fatal or an integer
    #[arg(short, long)]
    level: Option<MessageLevel>,

    /// Print which sender produced each message
    #[arg(long)]
    show_sender: bool,

    /// Messages to send, one emission each
    #[arg(required = true)]
    texts: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref())?;

    let mut config = match &cli.config {
        Some(path) => BroadcastConfig::load(path)?,
        None => BroadcastConfig::default(),
    };
    if let Some(relays) = cli.relays {
        config.relays = relays;
    }
    if cli.show_sender {
        config.receiver.show_sender = true;
    }
    config.validate()?;
    let level = cli.level.unwrap_or(config.default_level);

    let console = ConsoleReceiver::stdout(config.receiver.clone());
    let summary = harness::broadcast(&config, level, &cli.texts, console)?;
    println!("{}", summary);

    Ok(())
}

fn setup_logging(filter: Option<&str>) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
