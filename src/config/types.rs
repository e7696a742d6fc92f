use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::calculator::StatMode;
use crate::roster::ReferencePolicy;

/// Root settings container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Roster engine behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// How commands with dangling references are reported.
    #[serde(default)]
    pub reference_policy: ReferencePolicy,
    /// Whether forge world and doctrine modifiers change stats.
    #[serde(default)]
    pub stat_mode: StatMode,
    /// Starting points limit; the catalog's default limit when unset.
    #[serde(default)]
    pub points_limit: Option<u32>,
}

/// Where the catalog documents live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Directory holding the catalog documents (default: `data`).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_units_file")]
    pub units_file: String,
    #[serde(default = "default_profiles_file")]
    pub profiles_file: String,
    #[serde(default = "default_config_file")]
    pub config_file: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            units_file: default_units_file(),
            profiles_file: default_profiles_file(),
            config_file: default_config_file(),
        }
    }
}

/// Tracing output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive (default: `info`). `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_units_file() -> String {
    "units.json".to_string()
}

fn default_profiles_file() -> String {
    "profiles.json".to_string()
}

fn default_config_file() -> String {
    "config.json".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}
