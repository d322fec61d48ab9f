//! Binary crate for the `weather-widget` command-line tool.
//!
//! This crate focuses on:
//! - Fetching reports from Open-Meteo
//! - Hosting the widget over an in-process channel
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod host;
mod open_meteo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
