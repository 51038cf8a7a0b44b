//! Dataset entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use datahub_core::types::id::{DatasetId, DatasetVersionId};

use crate::version::DatasetVersion;

/// A versioned research-data record.
///
/// `versions` is ordered most-recent-first. Only the version workflows
/// append to or reorder it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Unique dataset identifier.
    pub id: DatasetId,
    /// Version history, most recent first.
    pub versions: Vec<DatasetVersion>,
    /// When the dataset or its history last changed.
    pub modified_at: Option<DateTime<Utc>>,
    /// Optimistic concurrency counter maintained by the store.
    pub revision: u64,
}

impl Dataset {
    /// Create a dataset with an empty history.
    pub fn new() -> Self {
        Self {
            id: DatasetId::new(),
            versions: Vec::new(),
            modified_at: None,
            revision: 0,
        }
    }

    /// The most recent version, if any.
    pub fn latest_version(&self) -> Option<&DatasetVersion> {
        self.versions.first()
    }

    /// Find a version by ID.
    pub fn version(&self, id: DatasetVersionId) -> Option<&DatasetVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Whether a version with this ID is already in the history.
    pub fn contains_version(&self, id: DatasetVersionId) -> bool {
        self.version(id).is_some()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}
