//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for VinylVault.
//! Each subcommand is implemented in its own submodule for maintainability:
//! - `catalog`: Text search, barcode search and release details
//! - `serve`: The HTTP API
//! - `settings`: Inspecting and initializing the config file

mod catalog;
mod serve;
mod settings;

use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;

use crate::catalog::{CatalogSource, SearchService};
use crate::config::{self, Config};
use crate::error::ResultExt;

pub use catalog::{cmd_barcode, cmd_release, cmd_search};
pub use serve::cmd_serve;
pub use settings::cmd_config;

/// VinylVault CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog to query (overrides the config file)
    #[arg(long, global = true)]
    pub provider: Option<CatalogSource>,

    /// Discogs personal access token
    #[arg(long, global = true, env = "DISCOGS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog by artist, title or free text
    Search {
        /// Search terms
        query: String,
        /// Release type (release, master)
        #[arg(long = "type", default_value = "release")]
        release_type: String,
        /// Result page (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Results per page (1-100, defaults to the config value)
        #[arg(long)]
        per_page: Option<u32>,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Look up a record by the barcode on its sleeve
    Barcode {
        /// EAN/UPC barcode
        code: String,
        /// Result page (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Results per page (1-100, defaults to the config value)
        #[arg(long)]
        per_page: Option<u32>,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show full details of a release
    Release {
        /// Provider release id
        id: String,
        /// Print raw JSON
        #[arg(long)]
        json: bool,
        /// Print the collection entry this release would create
        #[arg(long)]
        prefill: bool,
        /// Collection category for the prefilled entry
        #[arg(long, requires = "prefill")]
        category: Option<String>,
    },
    /// Run the HTTP API
    Serve {
        /// Address to listen on (overrides the config file)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was specified
/// (meaning usage should be shown).
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let Some(command) = &cli.command else {
        return Ok(false);
    };

    let config = effective_config(cli);
    let rt = Runtime::new()?;

    match command {
        Commands::Search {
            query,
            release_type,
            page,
            per_page,
            json,
        } => {
            let per_page = per_page.unwrap_or(config.catalog.default_per_page);
            cmd_search(&rt, &config, query, release_type, *page, per_page, *json)?;
        }
        Commands::Barcode {
            code,
            page,
            per_page,
            json,
        } => {
            let per_page = per_page.unwrap_or(config.catalog.default_per_page);
            cmd_barcode(&rt, &config, code, *page, per_page, *json)?;
        }
        Commands::Release {
            id,
            json,
            prefill,
            category,
        } => {
            let prefill = prefill.then_some(category.as_deref());
            cmd_release(&rt, &config, id, *json, prefill)?;
        }
        Commands::Serve { bind } => {
            cmd_serve(&rt, config.clone(), bind.as_deref())?;
        }
        Commands::Config { init } => {
            cmd_config(&config, *init)?;
        }
    }

    Ok(true)
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Config file plus environment, then command-line overrides
fn effective_config(cli: &Cli) -> Config {
    let mut config = config::load();
    apply_overrides(&mut config, cli);
    config
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(provider) = cli.provider {
        config.catalog.provider = provider;
    }
    if let Some(token) = cli.token.as_ref().filter(|t| !t.trim().is_empty()) {
        config.credentials.discogs_token = Some(token.clone());
    }
}

/// Build the search service for the effective config
pub(crate) fn build_service(config: &Config) -> crate::error::Result<SearchService> {
    SearchService::from_config(config)
        .with_context(format!("setting up the {} client", config.catalog.provider))
}
