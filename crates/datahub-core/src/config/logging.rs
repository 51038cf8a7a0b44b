//! Logging configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Tracing subscriber configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// Default filter directive (`"info"`, `"datahub_service=debug"`, ...).
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_level")]
    #[validate(length(min = 1))]
    pub level: String,
    /// Output format: `"json"` or `"pretty"`.
    #[serde(default = "default_format")]
    #[validate(custom(function = "validate_format"))]
    pub format: String,
    /// Whether to include the event target (module path).
    #[serde(default = "default_true")]
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            with_target: default_true(),
        }
    }
}

fn validate_format(format: &str) -> Result<(), validator::ValidationError> {
    match format {
        "json" | "pretty" => Ok(()),
        _ => Err(validator::ValidationError::new("unknown_log_format")),
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "json".to_string()
}

fn default_true() -> bool {
    true
}
