//! Configuration types for sheet-ticker

use crate::sheets::ValueInputOption;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, expected next to the executable
pub const DEFAULT_CONFIG_FILE: &str = "sheet-ticker.toml";

/// Errors raised while locating or loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file missing or unreadable
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid TOML or is missing required keys
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub spreadsheet: SpreadsheetConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Target spreadsheet and the named ranges touched each run
#[derive(Debug, Clone, Deserialize)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: String,
    /// Single cell receiving the update timestamp
    pub update_time_range_name: String,
    /// Range the ticker symbols are read from
    pub crypto_ticker_range_name: String,
    /// Range the price rows are written to
    pub to_write_range_name: String,
    pub value_input_option: ValueInputOption,
}

/// OAuth credential locations
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Google installed-app client secret, relative paths resolve
    /// next to the executable like the config file itself
    #[serde(default = "default_client_secret_path")]
    pub client_secret_path: PathBuf,
    /// Cached token location; defaults under the user's home directory
    pub token_cache_path: Option<PathBuf>,
}

fn default_client_secret_path() -> PathBuf {
    PathBuf::from("client_secret.json")
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_secret_path: default_client_secret_path(),
            token_cache_path: None,
        }
    }
}

/// Market data provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_market_base_url")]
    pub base_url: String,
    #[serde(default = "default_market_timeout_secs")]
    pub timeout_secs: u64,
    /// Number of ticker entries to request; 0 asks for the full universe
    #[serde(default)]
    pub limit: u32,
}

fn default_market_base_url() -> String {
    crate::market::CMC_API_URL.to_string()
}
fn default_market_timeout_secs() -> u64 {
    10
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_base_url(),
            timeout_secs: default_market_timeout_secs(),
            limit: 0,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Relative paths are resolved against the executable's directory, so
    /// the config file travels with the binary regardless of where the
    /// scheduler invokes it from.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = resolve_config_path(path.as_ref());
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })?;
        Ok(config)
    }
}

/// Resolve a relative config path against the directory containing the
/// running executable; absolute paths pass through untouched. Falls back
/// to the path as given when the executable location is unavailable.
pub fn resolve_config_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
