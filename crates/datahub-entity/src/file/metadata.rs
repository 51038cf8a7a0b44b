//! File metadata entity.

use serde::{Deserialize, Serialize};

use datahub_core::types::id::{DataFileId, DatasetVersionId, FileMetadataId};

/// How one data file is presented within one dataset version.
///
/// The underlying content (`data_file_id`) is shared by every version that
/// lists the file; only this wrapper is per-version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Unique wrapper identifier.
    pub id: FileMetadataId,
    /// The version this entry belongs to.
    pub version_id: DatasetVersionId,
    /// The shared, immutable file content.
    pub data_file_id: DataFileId,
    /// Display name of the file.
    pub label: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Folder path shown for the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory_label: Option<String>,
    /// Tags such as "Data", "Documentation", "Code".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    /// Sort position within the version.
    pub display_order: i32,
    /// Whether access to the content requires a request.
    #[serde(default)]
    pub restricted: bool,
}

impl FileMetadata {
    /// Create an entry for `data_file_id` in `version_id`.
    pub fn new(
        version_id: DatasetVersionId,
        data_file_id: DataFileId,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: FileMetadataId::new(),
            version_id,
            data_file_id,
            label: label.into(),
            description: None,
            directory_label: None,
            categories: Vec::new(),
            display_order: 0,
            restricted: false,
        }
    }

    /// Produce an independent wrapper with a fresh identity, bound to
    /// `version_id` and pointing at the same data file.
    pub fn copy_for(&self, version_id: DatasetVersionId) -> Self {
        Self {
            id: FileMetadataId::new(),
            version_id,
            ..self.clone()
        }
    }
}
