//! Binary crate for the `weather` dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Rendering the dashboard widgets in the terminal

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod chart;
mod cli;
mod palette;
mod radar;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cmd = cli::Cli::parse();
    init_logging(cmd.verbose);
    cmd.run().await
}

/// Logs go to stderr so they never mix with the dashboard. `RUST_LOG` wins
/// over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}
