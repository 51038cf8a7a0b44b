//! Version-creation configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for the dataset version-creation workflow.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VersioningConfig {
    /// Whether requests validate field values unless they opt out.
    #[serde(default = "default_true")]
    pub validate_by_default: bool,
    /// Whether a reindex is requested after each stored version.
    #[serde(default = "default_true")]
    pub reindex_on_create: bool,
    /// Value passed as the `minor_update` flag of reindex requests.
    #[serde(default = "default_true")]
    pub index_minor_update: bool,
    /// System-reserved metadata blocks, mapped to the key that unlocks them.
    #[serde(default)]
    #[validate(custom(function = "validate_system_keys"))]
    pub system_blocks: HashMap<String, String>,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            validate_by_default: true,
            reindex_on_create: true,
            index_minor_update: true,
            system_blocks: HashMap::new(),
        }
    }
}

fn validate_system_keys(
    blocks: &HashMap<String, String>,
) -> Result<(), validator::ValidationError> {
    if blocks
        .iter()
        .any(|(block, key)| block.trim().is_empty() || key.trim().is_empty())
    {
        return Err(validator::ValidationError::new("empty_system_block_key"));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}
