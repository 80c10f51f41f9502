//! Application settings read from an optional JSON file.

use crate::data::{DEFAULT_TOP_N, TOP_N_RANGE};
use crate::i18n::Locale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vgsales_dashboard.json";

/// Overrides the settings file location.
pub const CONFIG_ENV_VAR: &str = "VGSALES_DASHBOARD_CONFIG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("default_top_n must be between {min} and {max}, got {value}")]
    InvalidTopN { value: usize, min: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sales CSV to load at startup
    pub data_path: PathBuf,
    /// Initial display language
    pub language: Locale,
    /// Initial value of the top-N slider
    pub default_top_n: usize,
    /// Where exported chart images are written
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("vgsales.csv"),
            language: Locale::En,
            default_top_n: DEFAULT_TOP_N,
            export_dir: PathBuf::from("exports"),
        }
    }
}

impl AppConfig {
    /// Resolve the settings file from the environment, falling back to the default name.
    pub fn locate() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Read settings from `path`; a missing file gives the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_json(&text)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !TOP_N_RANGE.contains(&self.default_top_n) {
            return Err(ConfigError::InvalidTopN {
                value: self.default_top_n,
                min: *TOP_N_RANGE.start(),
                max: *TOP_N_RANGE.end(),
            });
        }
        Ok(())
    }
}
