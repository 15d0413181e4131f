//! Configuration inspection command.

use crate::config::{self, Config};
use crate::error::ResultExt;

/// Print the effective configuration, optionally writing it to disk
pub fn cmd_config(config: &Config, init: bool) -> anyhow::Result<()> {
    match config::config_path() {
        Some(path) => println!("# Config file: {}", path.display()),
        None => println!("# Config file: (no config directory on this system)"),
    }

    println!("{}", toml::to_string_pretty(&redacted(config))?);

    if init {
        let path = config::save(config).with_context("writing config file")?;
        println!("# Wrote {}", path.display());
    }
    Ok(())
}

/// Copy of the config that is safe to print
fn redacted(config: &Config) -> Config {
    let mut shown = config.clone();
    if let Some(token) = shown.credentials.discogs_token.as_mut() {
        let prefix: String = token.chars().take(4).collect();
        *token = format!("{prefix}...");
    }
    shown
}
