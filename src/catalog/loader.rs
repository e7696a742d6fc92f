//! Loads the catalog documents from disk.
//!
//! The three documents are read concurrently and awaited together. Any
//! failure aborts the load: there is no partial catalog.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::profiles::{GameConfig, ProfileCatalog, UnitCatalog};
use super::registry::Catalog;
use crate::config::CatalogSettings;

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog document '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog document '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog validation failed: {message}")]
    Validation { message: String },
}

impl CatalogError {
    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CatalogError::Parse {
            path: path.into(),
            source,
        }
    }
}

/// File names of the catalog documents inside a data directory.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    units_path: PathBuf,
    profiles_path: PathBuf,
    config_path: PathBuf,
}

impl CatalogLoader {
    /// Loader for `units.json`, `profiles.json` and `config.json` in `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            units_path: dir.join("units.json"),
            profiles_path: dir.join("profiles.json"),
            config_path: dir.join("config.json"),
        }
    }

    /// Loader using the directory and file names from settings.
    pub fn from_settings(settings: &CatalogSettings) -> Self {
        let dir = &settings.data_dir;
        Self {
            units_path: dir.join(&settings.units_file),
            profiles_path: dir.join(&settings.profiles_file),
            config_path: dir.join(&settings.config_file),
        }
    }

    /// Read, parse and validate all three documents.
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let (units, profiles, config) = tokio::try_join!(
            read_document::<UnitCatalog>(&self.units_path),
            read_document::<ProfileCatalog>(&self.profiles_path),
            read_document::<GameConfig>(&self.config_path),
        )?;

        Catalog::new(units.units, profiles, config)
    }

    /// Convenience for `CatalogLoader::new(dir).load()`.
    pub async fn load_all(dir: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
        Self::new(dir).load().await
    }
}

async fn read_document<T>(path: &Path) -> Result<T, CatalogError>
where
    T: serde::de::DeserializeOwned,
{
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Catalog document read");

    serde_json::from_str(&content).map_err(|e| CatalogError::parse(path, e))
}
