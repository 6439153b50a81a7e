//! Configuration loading and representation.
//!
//! Everything is read from the environment with a logged fallback to the
//! defaults:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `STOCKROOM_INVENTORY_FILE` | `inventory.txt` |
//! | `STOCKROOM_ON_MALFORMED` (`abort` / `skip`) | `abort` |
//! | `STOCKROOM_LOG_LEVEL` | `warn` |
//! | `STOCKROOM_LOG_FORMAT` (`text` / `json`) | `text` |

use core::str::FromStr;
use std::path::PathBuf;

use thiserror::Error;

use stockroom_observability::{LogFormat, LoggingConfig};

pub const INVENTORY_FILE_VAR: &str = "STOCKROOM_INVENTORY_FILE";
pub const ON_MALFORMED_VAR: &str = "STOCKROOM_ON_MALFORMED";
pub const LOG_LEVEL_VAR: &str = "STOCKROOM_LOG_LEVEL";
pub const LOG_FORMAT_VAR: &str = "STOCKROOM_LOG_FORMAT";

pub const DEFAULT_INVENTORY_FILE: &str = "inventory.txt";

/// What to do with a record line that cannot be parsed during load.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum MalformedLinePolicy {
    /// Fail the whole load and keep the in-memory inventory as it was.
    #[default]
    Abort,
    /// Drop the line, log it and keep loading.
    Skip,
}

impl FromStr for MalformedLinePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(MalformedLinePolicy::Abort),
            "skip" => Ok(MalformedLinePolicy::Skip),
            other => Err(format!("unknown policy {other:?}")),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    Invalid {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockroomConfig {
    pub inventory_path: PathBuf,
    pub on_malformed: MalformedLinePolicy,
    pub logging: LoggingConfig,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_FILE),
            on_malformed: MalformedLinePolicy::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StockroomConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup(INVENTORY_FILE_VAR).filter(|v| !v.trim().is_empty()) {
            Some(path) => config.inventory_path = PathBuf::from(path.trim()),
            None => tracing::debug!(
                "{INVENTORY_FILE_VAR} not set; using {DEFAULT_INVENTORY_FILE}"
            ),
        }

        if let Some(value) = lookup(ON_MALFORMED_VAR) {
            config.on_malformed = value.parse().map_err(|_| ConfigError::Invalid {
                key: ON_MALFORMED_VAR,
                value,
                expected: "abort or skip",
            })?;
        }

        if let Some(level) = lookup(LOG_LEVEL_VAR).filter(|v| !v.trim().is_empty()) {
            config.logging.default_level = level.trim().to_string();
        }

        if let Some(value) = lookup(LOG_FORMAT_VAR) {
            config.logging.format =
                value.parse::<LogFormat>().map_err(|_| ConfigError::Invalid {
                    key: LOG_FORMAT_VAR,
                    value,
                    expected: "text or json",
                })?;
        }

        Ok(config)
    }

    /// Override the inventory path (e.g. from the command line).
    pub fn with_inventory_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.inventory_path = path.into();
        self
    }
}
