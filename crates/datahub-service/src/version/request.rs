//! Input of a version-creation call.

use datahub_entity::version::DatasetVersion;

/// A caller-built candidate version plus the options for attaching it.
///
/// The candidate must not already be part of the dataset's history.
#[derive(Debug, Clone)]
pub struct CreateVersionRequest {
    /// The unattached version to add.
    pub candidate: DatasetVersion,
    /// Whether field values are validated before the candidate is admitted.
    pub validate: bool,
    /// Key unlocking system-reserved metadata blocks, if the actor has one.
    pub privileged_key: Option<String>,
}

impl CreateVersionRequest {
    /// A request that validates field values and carries no key.
    pub fn new(candidate: DatasetVersion) -> Self {
        Self {
            candidate,
            validate: true,
            privileged_key: None,
        }
    }

    /// Skip field validation. Initialization and tidying still run.
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }

    /// Set whether field values are validated.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Supply a key for system-reserved metadata blocks.
    pub fn with_privileged_key(mut self, key: impl Into<String>) -> Self {
        self.privileged_key = Some(key.into());
        self
    }
}
