//! # datahub
//!
//! Dataset version creation: adds a new version to a dataset's history
//! while keeping the draft, file-metadata and field-metadata rules intact.
//!
//! The workspace crates are re-exported here together with the logging
//! bootstrap used by embedding applications and the integration tests.

use tracing_subscriber::{EnvFilter, fmt};

use datahub_core::config::{AppConfig, LoggingConfig};
use datahub_core::error::AppError;

pub use datahub_core as core;
pub use datahub_database as database;
pub use datahub_entity as entity;
pub use datahub_service as service;

/// Load configuration for the environment named by `DATAHUB_ENV`
/// (default `development`).
pub fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("DATAHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env)?;
    tracing::debug!(env = %env, "Configuration loaded");
    Ok(config)
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. Fails if a subscriber is
/// already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .with_thread_ids(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .try_init(),
    };

    result.map_err(|e| AppError::configuration(format!("Failed to install logger: {e}")))
}
