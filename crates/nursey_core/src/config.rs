//! Core configuration loaded from TOML.
//!
//! # Responsibility
//! - Parse the optional `nursey.toml` settings file.
//! - Provide defaults that reproduce the stock scheduling behavior.
//!
//! # Invariants
//! - `projection_horizon_days` is always longer than the longest recurrence
//!   stride (28 days), so every recurring task gets at least one candidate.
//! - `projection_horizon_days` never exceeds `MAX_PROJECTION_HORIZON_DAYS`.

use crate::logging::default_log_level;
use crate::model::recurrence::Recurrence;
use crate::schedule::{ProjectionHorizon, DEFAULT_PROJECTION_HORIZON_DAYS};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Ten years.
pub const MAX_PROJECTION_HORIZON_DAYS: i64 = 3650;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for the core. Every field is optional in the TOML source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Days ahead of today that ghost projection may look.
    pub projection_horizon_days: i64,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<PathBuf>,
    /// SQLite database file for the persisted book.
    pub db_path: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            projection_horizon_days: DEFAULT_PROJECTION_HORIZON_DAYS,
            log_level: default_log_level().to_string(),
            log_dir: None,
            db_path: None,
        }
    }
}

impl CoreConfig {
    /// Parses and validates TOML text. Blank input yields the defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let longest_stride = Recurrence::Month.interval_days().unwrap_or(28);
        if self.projection_horizon_days <= longest_stride {
            return Err(ConfigError::Invalid(format!(
                "projection_horizon_days must be greater than {longest_stride}, got {}",
                self.projection_horizon_days
            )));
        }
        if self.projection_horizon_days > MAX_PROJECTION_HORIZON_DAYS {
            return Err(ConfigError::Invalid(format!(
                "projection_horizon_days must be at most {MAX_PROJECTION_HORIZON_DAYS}, got {}",
                self.projection_horizon_days
            )));
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    pub fn projection_horizon(&self) -> ProjectionHorizon {
        ProjectionHorizon::from_days(self.projection_horizon_days)
    }
}
