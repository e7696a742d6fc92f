use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Returns `false` when a global
/// subscriber was already installed, which leaves that one in place.
pub fn init_tracing(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .try_init()
        .is_ok()
}

pub fn init_from_settings(settings: &LoggingSettings) -> bool {
    init_tracing(&settings.filter)
}
