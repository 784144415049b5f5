//! Binary crate for the `meteo` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and setting up logging
//! - The interactive menu loop
//! - Human-friendly output

use clap::Parser;

mod app;
mod cli;
mod menu;
mod prompt;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
