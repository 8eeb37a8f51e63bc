//! Application configuration
//!
//! Loaded from a TOML file with serde, field by field. The config file is
//! optional; every section has working defaults so the tool runs with no
//! setup at all.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable that overrides the config file location.
const CONFIG_PATH_ENV: &str = "GULMARKET_CONFIG";

/// Base URL the spreadsheet export endpoint is built from.
pub const DEFAULT_EXPORT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub sheets: SheetsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. Defaults to the platform data dir.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// Base URL for spreadsheet exports, without a trailing slash.
    pub export_base_url: String,
    /// Timeout for one export request, in seconds.
    pub timeout_secs: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            export_base_url: DEFAULT_EXPORT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load the config from `$GULMARKET_CONFIG`, falling back to
    /// `<config_dir>/gulmarket/config.toml`. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(p) => PathBuf::from(p),
            None => match dirs::config_dir() {
                Some(dir) => dir.join("gulmarket").join("config.toml"),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl DatabaseConfig {
    /// Resolve the database file path, defaulting under the platform data dir.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        let dir = dirs::data_dir().context("Could not determine the platform data directory")?;
        Ok(dir.join("gulmarket").join("deliveries.db"))
    }
}
