// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! lend - Lending registry CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod commands;
mod output;
mod script;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{list, run, simulate};
use lend_core::LendingConfig;
use std::path::PathBuf;
use tracing::debug;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "lend",
    version,
    about = "Lending registry - borrow, return, and reserve items"
)]
struct Cli {
    /// Catalog and timing configuration (TOML); uses a demo catalog when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available items
    List,
    /// List every item with its status
    Items,
    /// Reserve one item for several members at once
    Simulate(simulate::SimulateArgs),
    /// Execute a command script
    Run(run::RunArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => LendingConfig::load(path)?,
        None => LendingConfig::demo(),
    };
    debug!(
        items = config.items.len(),
        members = config.members.len(),
        hold = ?config.reservation.hold,
        "configuration loaded"
    );
    let registry = config.build_registry();

    match cli.command {
        Commands::List => list::available(&registry, cli.format),
        Commands::Items => list::all(&registry, cli.format),
        Commands::Simulate(args) => {
            simulate::simulate(args, &registry, &config.coordinator, cli.format).await?
        }
        Commands::Run(args) => run::run(args, &registry, &config.coordinator).await?,
    }

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
