//! VinylVault - search external music catalogs for records to add to a vinyl collection.
//!
//! Searches Discogs or MusicBrainz by text or barcode, keeps only vinyl
//! pressings, and serves the results over a small REST API or prints them
//! on the command line.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
#[cfg(test)]
pub mod test_utils;

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("vinyl_vault=info".parse()?))
        .init();

    // Try to run a CLI command
    if cli::run_command(&args)? {
        // A command was executed, exit normally
        return Ok(());
    }

    // No command specified, show usage
    cli::Cli::command().print_help()?;
    println!();
    Ok(())
}
