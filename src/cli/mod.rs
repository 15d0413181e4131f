//! Command-line interface for vinyl-vault.
//!
//! This module provides CLI commands for searching external catalogs,
//! looking up releases and running the HTTP API.

mod commands;

pub use commands::{Cli, Commands, run_command};
