//! Version store trait.

use async_trait::async_trait;

use datahub_core::result::AppResult;
use datahub_core::types::id::DatasetId;
use datahub_entity::dataset::Dataset;
use datahub_entity::version::DatasetVersion;

/// Durable storage for datasets and their version history.
///
/// Implementations serialize concurrent writers with the dataset's
/// `revision` counter: a write is accepted only when `dataset.revision`
/// matches the stored revision, and a successful write advances the stored
/// revision by one. A mismatch is reported as a
/// [`Conflict`](datahub_core::error::ErrorKind::Conflict) error.
#[async_trait]
pub trait VersionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist `version`, which must already be the head of
    /// `dataset.versions`, together with the dataset's updated history and
    /// modification time. Returns the stored version.
    async fn store_version(
        &self,
        dataset: &Dataset,
        version: &DatasetVersion,
    ) -> AppResult<DatasetVersion>;

    /// Load the most recent stored version of a dataset.
    async fn load_latest(&self, dataset_id: DatasetId) -> AppResult<Option<DatasetVersion>>;

    /// Load a dataset with its full history.
    async fn load_dataset(&self, dataset_id: DatasetId) -> AppResult<Option<Dataset>>;
}
