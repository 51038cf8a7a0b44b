//! Dataset version entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use datahub_core::types::id::{DatasetId, DatasetVersionId};

use crate::field::FieldTree;
use crate::file::FileMetadata;
use crate::version::state::VersionState;

/// One snapshot of a dataset's metadata and files.
///
/// A version is built by the caller in a transient state
/// (`dataset_id == None`); the version workflow attaches it to its dataset
/// and stamps its timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetVersion {
    /// Unique version identifier.
    pub id: DatasetVersionId,
    /// The owning dataset, unset until attached.
    pub dataset_id: Option<DatasetId>,
    /// Lifecycle state.
    pub state: VersionState,
    /// Major version number, assigned on release.
    pub version_number: Option<i32>,
    /// Minor version number, assigned on release.
    pub minor_version_number: Option<i32>,
    /// Free-text note describing the change.
    pub version_note: Option<String>,
    /// Metadata field values grouped by block.
    pub fields: FieldTree,
    /// File presentation entries, in display order.
    pub file_metadatas: Vec<FileMetadata>,
    /// When this version was created.
    pub created_at: Option<DateTime<Utc>>,
    /// When this version was last updated.
    pub last_update_time: Option<DateTime<Utc>>,
}

impl DatasetVersion {
    /// Create an unattached version in the given state.
    pub fn new(state: VersionState) -> Self {
        Self {
            id: DatasetVersionId::new(),
            dataset_id: None,
            state,
            version_number: None,
            minor_version_number: None,
            version_note: None,
            fields: FieldTree::new(),
            file_metadatas: Vec::new(),
            created_at: None,
            last_update_time: None,
        }
    }

    /// Create an unattached draft.
    pub fn draft() -> Self {
        Self::new(VersionState::Draft)
    }

    /// Create an unattached released version numbered `major.minor`.
    pub fn released(major: i32, minor: i32) -> Self {
        Self {
            version_number: Some(major),
            minor_version_number: Some(minor),
            ..Self::new(VersionState::Released)
        }
    }

    /// Replace the field tree.
    pub fn with_fields(mut self, fields: FieldTree) -> Self {
        self.fields = fields;
        self
    }

    /// Whether this version is the editable working copy.
    pub fn is_working_copy(&self) -> bool {
        self.state.is_working_copy()
    }

    /// Whether this version has been attached to a dataset.
    pub fn is_attached(&self) -> bool {
        self.dataset_id.is_some()
    }

    /// Human-readable version label (`"1.2"` or `"DRAFT"`).
    pub fn friendly_number(&self) -> String {
        match (self.version_number, self.minor_version_number) {
            (Some(major), Some(minor)) => format!("{major}.{minor}"),
            (Some(major), None) => format!("{major}.0"),
            _ => self.state.to_string(),
        }
    }
}
