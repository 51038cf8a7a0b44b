//! Application configuration schemas.
//!
//! Configuration is deserialized from TOML files and `DATAHUB__*`
//! environment variables via the `config` crate, then checked with
//! `validator`. Each sub-module is one configuration section.

pub mod logging;
pub mod versioning;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use self::logging::LoggingConfig;
pub use self::versioning::VersioningConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Logging settings.
    #[serde(default)]
    #[validate(nested)]
    pub logging: LoggingConfig,
    /// Version-creation settings.
    #[serde(default)]
    #[validate(nested)]
    pub versioning: VersioningConfig,
}

impl AppConfig {
    /// Load configuration for the given environment.
    ///
    /// Merges `config/default`, the `config/{env}` overlay and environment
    /// variables prefixed with `DATAHUB` (`DATAHUB__LOGGING__LEVEL=debug`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("DATAHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        Self::from_config(config)
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Self::from_config(config)
    }

    fn from_config(config: config::Config) -> Result<Self, AppError> {
        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        parsed.validate()?;
        Ok(parsed)
    }
}
