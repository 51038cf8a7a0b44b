//! Detached reindex requests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use datahub_core::result::AppResult;
use datahub_core::types::id::DatasetId;

/// Updates the search index for a dataset.
#[async_trait]
pub trait DatasetIndexer: Send + Sync + std::fmt::Debug + 'static {
    /// Reindex `dataset_id`. `minor_update` marks changes that do not
    /// require cleaning up the dataset's existing index documents.
    async fn reindex(&self, dataset_id: DatasetId, minor_update: bool) -> AppResult<()>;
}

/// Sends reindex requests to an optional [`DatasetIndexer`] without
/// waiting for them. Failures are logged and never reach the caller.
#[derive(Debug, Clone)]
pub struct IndexDispatcher {
    indexer: Option<Arc<dyn DatasetIndexer>>,
    minor_update: bool,
}

impl IndexDispatcher {
    /// A dispatcher forwarding to `indexer`.
    pub fn new(indexer: Arc<dyn DatasetIndexer>) -> Self {
        Self {
            indexer: Some(indexer),
            minor_update: true,
        }
    }

    /// A dispatcher that drops every request.
    pub fn disabled() -> Self {
        Self {
            indexer: None,
            minor_update: true,
        }
    }

    /// Set the `minor_update` flag sent with each request.
    pub fn with_minor_update(mut self, minor_update: bool) -> Self {
        self.minor_update = minor_update;
        self
    }

    /// The `minor_update` flag sent with each request.
    pub fn minor_update(&self) -> bool {
        self.minor_update
    }

    /// Whether an indexer is configured.
    pub fn is_enabled(&self) -> bool {
        self.indexer.is_some()
    }

    /// Spawns a reindex of `dataset_id` on the current Tokio runtime.
    ///
    /// Returns the task handle so that callers which care (tests, graceful
    /// shutdown) can wait for it; dropping the handle detaches the task.
    /// Returns `None` when disabled or when called outside a runtime.
    pub fn request_reindex(&self, dataset_id: DatasetId) -> Option<JoinHandle<()>> {
        let indexer = Arc::clone(self.indexer.as_ref()?);
        let minor_update = self.minor_update;

        let Ok(runtime) = Handle::try_current() else {
            warn!(dataset_id = %dataset_id, "No async runtime, reindex request dropped");
            return None;
        };

        Some(runtime.spawn(async move {
            match indexer.reindex(dataset_id, minor_update).await {
                Ok(()) => debug!(dataset_id = %dataset_id, "Dataset reindexed"),
                Err(e) => warn!(dataset_id = %dataset_id, error = %e, "Dataset reindex failed"),
            }
        }))
    }
}

impl Default for IndexDispatcher {
    fn default() -> Self {
        Self::disabled()
    }
}
