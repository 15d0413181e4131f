//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\vinyl-vault\config.toml
//! - macOS: ~/Library/Application Support/vinyl-vault/config.toml
//! - Linux: ~/.config/vinyl-vault/config.toml
//!
//! The config file is human-readable and editable. Every section is optional;
//! anything left out takes its default. `DISCOGS_TOKEN` and
//! `MUSICBRAINZ_USER_AGENT` override the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{self, CatalogSource, FormatFilter};

/// Environment variable overriding `credentials.discogs_token`
pub const DISCOGS_TOKEN_ENV: &str = "DISCOGS_TOKEN";

/// Environment variable overriding `credentials.musicbrainz_user_agent`
pub const MUSICBRAINZ_USER_AGENT_ENV: &str = "MUSICBRAINZ_USER_AGENT";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API credentials (keep separate for potential future encryption)
    pub credentials: Credentials,

    /// Catalog provider and client settings
    pub catalog: CatalogConfig,

    /// Search result filtering
    pub filter: FilterConfig,

    /// HTTP server settings
    pub server: ServerConfig,
}

/// API credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Discogs personal access token
    pub discogs_token: Option<String>,

    /// User-Agent sent to MusicBrainz (they ask for app name + contact)
    pub musicbrainz_user_agent: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            discogs_token: None,
            musicbrainz_user_agent: catalog::USER_AGENT.to_string(),
        }
    }
}

/// Catalog client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Which catalog to search: "discogs" or "musicbrainz"
    pub provider: CatalogSource,

    pub discogs_base_url: String,
    pub musicbrainz_base_url: String,
    pub cover_art_base_url: String,

    /// Timeout for catalog requests, in seconds
    pub request_timeout_secs: u64,

    /// Timeout for a single cover art lookup, in seconds
    pub cover_timeout_secs: u64,

    /// Cover art lookups in flight per search
    pub cover_concurrency: usize,

    /// Minimum spacing between MusicBrainz requests, in milliseconds
    pub musicbrainz_min_interval_ms: u64,

    /// Page size when none is requested
    pub default_per_page: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            provider: CatalogSource::Discogs,
            discogs_base_url: catalog::discogs::DEFAULT_BASE_URL.to_string(),
            musicbrainz_base_url: catalog::musicbrainz::DEFAULT_BASE_URL.to_string(),
            cover_art_base_url: catalog::coverart::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            cover_timeout_secs: 5,
            cover_concurrency: catalog::service::DEFAULT_COVER_CONCURRENCY,
            musicbrainz_min_interval_ms: 1000,
            default_per_page: catalog::domain::DEFAULT_PER_PAGE,
        }
    }
}

impl CatalogConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn cover_timeout(&self) -> Duration {
        Duration::from_secs(self.cover_timeout_secs.max(1))
    }

    pub fn musicbrainz_min_interval(&self) -> Duration {
        Duration::from_millis(self.musicbrainz_min_interval_ms)
    }
}

/// Search result filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Drop results whose formats don't match `keywords`
    pub vinyl_only: bool,

    /// Lowercase substrings that mark a format list as vinyl
    pub keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            vinyl_only: true,
            keywords: catalog::normalize::VINYL_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl FilterConfig {
    pub fn format_filter(&self) -> FormatFilter {
        if self.vinyl_only {
            if self.keywords.iter().all(|k| k.trim().is_empty()) {
                tracing::warn!("[filter] keywords is empty, using the default vinyl keywords");
                return FormatFilter::vinyl();
            }
            FormatFilter::keywords(&self.keywords)
        } else {
            FormatFilter::Any
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Config {
    /// Apply environment overrides, looking variables up through `var`
    pub fn apply_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = var(DISCOGS_TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            tracing::debug!("Using Discogs token from {}", DISCOGS_TOKEN_ENV);
            self.credentials.discogs_token = Some(token);
        }
        if let Some(agent) = var(MUSICBRAINZ_USER_AGENT_ENV).filter(|a| !a.trim().is_empty()) {
            self.credentials.musicbrainz_user_agent = agent;
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vinyl-vault"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk, then apply environment overrides
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let mut config = match config_path() {
        Some(path) if path.exists() => match load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("{}", e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Some(path) => {
            tracing::info!("No config file found at {:?}, using defaults", path);
            Config::default()
        }
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            Config::default()
        }
    };

    config.apply_env(|name| std::env::var(name).ok());
    config
}

/// Read and parse one config file
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
    toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to `path`
///
/// Creates the parent directory if it doesn't exist.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    // Serialize to pretty TOML
    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
