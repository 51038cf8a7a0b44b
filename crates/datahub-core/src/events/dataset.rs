//! Dataset-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::id::{DatasetId, DatasetVersionId};

/// Events related to dataset versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DatasetEvent {
    /// A new version was attached to a dataset and stored.
    VersionCreated {
        /// The dataset ID.
        dataset_id: DatasetId,
        /// The new version ID.
        version_id: DatasetVersionId,
        /// State of the new version (`draft`, `released`, ...).
        state: String,
        /// Number of file metadata entries carried forward.
        file_count: usize,
        /// Length of the version history after the change.
        history_len: usize,
    },
}
