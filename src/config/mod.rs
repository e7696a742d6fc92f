//! Settings for the roster engine, catalog location and logging.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CatalogSettings, EngineSettings, LoggingSettings, Settings};
