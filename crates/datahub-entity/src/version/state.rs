//! Version state enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of a dataset version.
///
/// `Draft` is the only working-copy state; every other state is final
/// with respect to field and file edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionState {
    /// Open for edits, not yet published.
    Draft,
    /// Published.
    Released,
    /// Withdrawn from public view.
    Deaccessioned,
    /// Superseded and archived.
    Archived,
}

impl VersionState {
    /// Whether this is the working-copy state.
    pub fn is_working_copy(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Return the state as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Released => "RELEASED",
            Self::Deaccessioned => "DEACCESSIONED",
            Self::Archived => "ARCHIVED",
        }
    }
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VersionState {
    type Err = datahub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "RELEASED" => Ok(Self::Released),
            "DEACCESSIONED" => Ok(Self::Deaccessioned),
            "ARCHIVED" => Ok(Self::Archived),
            _ => Err(datahub_core::AppError::validation(format!(
                "Invalid version state: '{s}'. Expected one of: DRAFT, RELEASED, DEACCESSIONED, ARCHIVED"
            ))),
        }
    }
}
