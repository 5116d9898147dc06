//! Configuration loading for ringtool.
//!
//! Configuration is loaded from an optional TOML file; every field has a
//! default, so an empty file (or no file) is valid.

use ringtool_core::Tool;
use ringtool_types::{Mode, ModeError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration for the ringtool driver.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Tool setup configuration.
    #[serde(default)]
    pub driver: DriverConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How the driver prepares the tool before running anything.
#[derive(Debug, Clone, Deserialize)]
pub struct DriverConfig {
    /// Call `init()` before the first step (default: true).
    #[serde(default = "default_auto_init")]
    pub auto_init: bool,
    /// Mode applied after auto-init (default: idle).
    #[serde(default)]
    pub initial_mode: Mode,
    /// Ticks run by a bare `process` step (default: 1).
    #[serde(default = "default_ticks")]
    pub ticks: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset (default: warn).
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_auto_init() -> bool {
    true
}

fn default_ticks() -> u32 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            auto_init: default_auto_init(),
            initial_mode: Mode::default(),
            ticks: default_ticks(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl DriverConfig {
    /// Build a tool prepared according to this configuration.
    ///
    /// Without `auto_init` the tool is returned untouched and the initial
    /// mode is not applied.
    pub fn prepare(&self) -> Result<Tool, ModeError> {
        let mut tool = Tool::new();
        if self.auto_init {
            tool.init();
            tool.set_mode(self.initial_mode)?;
        }
        Ok(tool)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}
