use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/itemgrid/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("itemgrid").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `base_url` is an http(s) URL and `items_path` is absolute
    /// - Timeouts are non-zero
    /// - `page_size` is at least 1
    /// - The offset of `initial_page` fits in a `u64`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let provider = &self.provider;

        if !(provider.base_url.starts_with("http://") || provider.base_url.starts_with("https://")) {
            return Err(validation_error(format!(
                "base_url '{}' must start with http:// or https://",
                provider.base_url
            )));
        }

        if !provider.items_path.starts_with('/') {
            return Err(validation_error(format!(
                "items_path '{}' must start with '/'",
                provider.items_path
            )));
        }

        if provider.timeout_seconds == 0 || provider.connect_timeout_seconds == 0 {
            return Err(validation_error("Timeouts must be greater than zero"));
        }

        if self.view.page_size == 0 {
            return Err(validation_error("page_size must be at least 1"));
        }

        if self.view.initial_page.checked_mul(self.view.page_size).is_none() {
            return Err(validation_error(format!(
                "initial_page {} is too large for page_size {}",
                self.view.initial_page, self.view.page_size
            )));
        }

        Ok(())
    }
}

fn validation_error(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        message: message.into(),
    }
}
