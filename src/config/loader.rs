use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::types::Settings;

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Settings validation failed: {message}")]
    ValidationError { message: String },
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Uses `~/.config/rosterforge/settings.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("rosterforge").join("settings.toml")
    }

    /// Loads settings from the default settings file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads settings from `path`.
    ///
    /// - If the file doesn't exist, returns `Settings::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        settings.validate()?;
        tracing::debug!(path = %path.display(), "Settings loaded");
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// Checks:
    /// - An explicit points limit is positive
    /// - Catalog file names are not empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.points_limit == Some(0) {
            return Err(ConfigError::ValidationError {
                message: "Points limit must be greater than zero".to_string(),
            });
        }

        let files = [
            ("units_file", &self.catalog.units_file),
            ("profiles_file", &self.catalog.profiles_file),
            ("config_file", &self.catalog.config_file),
        ];
        for (key, value) in files {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("Catalog setting '{}' must not be empty", key),
                });
            }
        }

        Ok(())
    }
}
