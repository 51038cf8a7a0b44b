//! In-memory version store guarded by a Tokio mutex.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use datahub_core::error::AppError;
use datahub_core::result::AppResult;
use datahub_core::types::id::DatasetId;
use datahub_entity::dataset::Dataset;
use datahub_entity::version::DatasetVersion;

use crate::store::VersionStore;

/// In-memory version store. Each dataset is kept as one snapshot, so a
/// history update and its new version are written together.
///
/// Suitable for tests and single-process embedding only.
#[derive(Debug, Clone, Default)]
pub struct MemoryVersionStore {
    datasets: Arc<Mutex<HashMap<DatasetId, Dataset>>>,
}

impl MemoryVersionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dataset snapshot as-is. Fails if the dataset is
    /// already stored.
    pub async fn insert(&self, dataset: &Dataset) -> AppResult<()> {
        let mut datasets = self.datasets.lock().await;
        if datasets.contains_key(&dataset.id) {
            return Err(AppError::conflict(format!(
                "Dataset {} is already stored",
                dataset.id
            )));
        }
        datasets.insert(dataset.id, dataset.clone());
        debug!(dataset_id = %dataset.id, versions = dataset.versions.len(), "Dataset inserted");
        Ok(())
    }

    /// Number of stored datasets.
    pub async fn len(&self) -> usize {
        self.datasets.lock().await.len()
    }

    /// Whether no dataset is stored.
    pub async fn is_empty(&self) -> bool {
        self.datasets.lock().await.is_empty()
    }
}

#[async_trait]
impl VersionStore for MemoryVersionStore {
    async fn store_version(
        &self,
        dataset: &Dataset,
        version: &DatasetVersion,
    ) -> AppResult<DatasetVersion> {
        if dataset.latest_version().map(|v| v.id) != Some(version.id) {
            return Err(AppError::internal(format!(
                "Version {} is not the head of dataset {}",
                version.id, dataset.id
            )));
        }

        let mut datasets = self.datasets.lock().await;
        let stored_revision = datasets.get(&dataset.id).map_or(0, |d| d.revision);

        if stored_revision != dataset.revision {
            warn!(
                dataset_id = %dataset.id,
                expected = dataset.revision,
                stored = stored_revision,
                "Concurrent modification detected"
            );
            return Err(AppError::conflict(format!(
                "Dataset {} was modified concurrently (revision {} != {})",
                dataset.id, dataset.revision, stored_revision
            )));
        }

        let mut snapshot = dataset.clone();
        snapshot.revision = stored_revision + 1;
        datasets.insert(dataset.id, snapshot);

        info!(
            dataset_id = %dataset.id,
            version_id = %version.id,
            revision = stored_revision + 1,
            "Version stored"
        );

        Ok(version.clone())
    }

    async fn load_latest(&self, dataset_id: DatasetId) -> AppResult<Option<DatasetVersion>> {
        let datasets = self.datasets.lock().await;
        Ok(datasets
            .get(&dataset_id)
            .and_then(|d| d.latest_version().cloned()))
    }

    async fn load_dataset(&self, dataset_id: DatasetId) -> AppResult<Option<Dataset>> {
        Ok(self.datasets.lock().await.get(&dataset_id).cloned())
    }
}
