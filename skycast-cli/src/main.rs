//! Binary crate for the `skycast` terminal forecast board.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and the consent gate
//! - Rendering the forecast board

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod board;
mod cli;
mod format;
mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Silent unless RUST_LOG is set; log lines go to stderr, the board
    // owns stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
