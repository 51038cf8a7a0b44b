//! Dataset version creation workflow.

use std::sync::Arc;

use tracing::{debug, info, warn};

use datahub_core::config::VersioningConfig;
use datahub_core::error::AppError;
use datahub_core::events::{DatasetEvent, DomainEvent, EventPayload};
use datahub_core::result::AppResult;
use datahub_core::traits::clock::Clock;
use datahub_database::store::VersionStore;
use datahub_entity::dataset::Dataset;
use datahub_entity::field::{FieldTree, MetadataSchema};
use datahub_entity::version::DatasetVersion;

use crate::context::RequestContext;
use crate::field::{FieldNormalizer, FieldValidator};
use crate::index::{DatasetIndexer, IndexDispatcher};
use crate::version::cloner;
use crate::version::guard::SystemMetadataGuard;
use crate::version::history;
use crate::version::request::CreateVersionRequest;

/// Adds a new version to a dataset's history.
///
/// Checks run before anything is changed: a failure at any step before the
/// store write leaves the dataset exactly as it was. If the store write
/// fails, the in-memory history update is undone.
#[derive(Debug, Clone)]
pub struct VersionWorkflow {
    /// Durable storage.
    store: Arc<dyn VersionStore>,
    /// Timestamp source.
    clock: Arc<dyn Clock>,
    /// Blocks and fields enabled for datasets handled by this workflow.
    schema: Arc<MetadataSchema>,
    /// System-reserved block protection.
    guard: SystemMetadataGuard,
    /// Field initialization and tidying.
    normalizer: FieldNormalizer,
    /// Field constraint checks.
    validator: FieldValidator,
    /// Detached reindex requests.
    indexer: IndexDispatcher,
    /// Whether stored versions trigger a reindex.
    reindex_on_create: bool,
    /// Default for [`CreateVersionRequest::validate`].
    validate_by_default: bool,
}

impl VersionWorkflow {
    /// Creates a workflow. System blocks and their keys come from `config`;
    /// no indexer is attached until [`VersionWorkflow::with_indexer`].
    pub fn new(
        store: Arc<dyn VersionStore>,
        clock: Arc<dyn Clock>,
        schema: Arc<MetadataSchema>,
        config: &VersioningConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            store,
            clock,
            schema,
            guard: SystemMetadataGuard::from_config(config),
            normalizer: FieldNormalizer::new(),
            validator: FieldValidator::new()?,
            indexer: IndexDispatcher::disabled().with_minor_update(config.index_minor_update),
            reindex_on_create: config.reindex_on_create,
            validate_by_default: config.validate_by_default,
        })
    }

    /// Attach a search indexer.
    pub fn with_indexer(mut self, indexer: Arc<dyn DatasetIndexer>) -> Self {
        let minor_update = self.indexer.minor_update();
        self.indexer = IndexDispatcher::new(indexer).with_minor_update(minor_update);
        self
    }

    /// Replace the system-block guard (e.g. with a custom key authority).
    pub fn with_guard(mut self, guard: SystemMetadataGuard) -> Self {
        self.guard = guard;
        self
    }

    /// A request for `candidate` using the configured validation default.
    pub fn request(&self, candidate: DatasetVersion) -> CreateVersionRequest {
        CreateVersionRequest::new(candidate).with_validation(self.validate_by_default)
    }

    /// Adds `request.candidate` as the most recent version of `dataset`.
    ///
    /// Steps, in order:
    /// 1. reject a second draft (or an already-attached candidate);
    /// 2. reject system-block changes without a valid key;
    /// 3. replace the candidate's files with copies of the latest version's;
    /// 4. attach, initialize the field tree and stamp timestamps;
    /// 5. validate the initialized tree, if requested;
    /// 6. tidy the tree;
    /// 7. prepend to the history and stamp the dataset;
    /// 8. store, undoing step 7 on failure;
    /// 9. request a reindex without waiting for it.
    pub async fn create_version(
        &self,
        ctx: &RequestContext,
        dataset: &mut Dataset,
        request: CreateVersionRequest,
    ) -> AppResult<DatasetVersion> {
        let CreateVersionRequest {
            mut candidate,
            validate,
            privileged_key,
        } = request;

        history::check_draft_invariant(dataset, &candidate)?;

        let empty = FieldTree::new();
        let latest = history::most_recent(dataset);
        let previous_fields = latest.map_or(&empty, |v| &v.fields);
        self.guard
            .check(previous_fields, &candidate.fields, privileged_key.as_deref())?;

        candidate.file_metadatas = latest
            .map(|v| cloner::clone_all(v, &candidate))
            .unwrap_or_default();

        let now = self.clock.now();
        candidate.dataset_id = Some(dataset.id);
        self.normalizer.initialize(&mut candidate.fields, &self.schema);
        candidate.created_at = Some(now);
        candidate.last_update_time = Some(now);

        if validate {
            let violations = self.validator.validate(&candidate.fields, &self.schema);
            if !violations.is_empty() {
                warn!(
                    user_id = %ctx.user_id,
                    username = %ctx.username,
                    dataset_id = %dataset.id,
                    violations = violations.len(),
                    "Version rejected by field validation"
                );
                return Err(AppError::invalid_fields(violations));
            }
        }

        self.normalizer.normalize(&mut candidate.fields, true);
        debug!(
            dataset_id = %dataset.id,
            version_id = %candidate.id,
            files = candidate.file_metadatas.len(),
            fields = candidate.fields.field_count(),
            "Candidate version prepared"
        );

        let version_id = candidate.id;
        let previous_modified_at = dataset.modified_at;
        history::prepend(dataset, candidate);
        dataset.modified_at = Some(now);

        let stored = {
            let head = history::most_recent(dataset)
                .ok_or_else(|| AppError::internal("Version history is empty after prepend"))?;
            self.store.store_version(dataset, head).await
        };

        let stored = match stored {
            Ok(stored) => stored,
            Err(e) => {
                history::remove_head(dataset, version_id);
                dataset.modified_at = previous_modified_at;
                warn!(
                    dataset_id = %dataset.id,
                    version_id = %version_id,
                    error = %e,
                    "Version store failed, history restored"
                );
                return Err(e);
            }
        };
        dataset.revision += 1;

        if self.reindex_on_create {
            // Detached: the handle is dropped and the result never awaited.
            let _ = self.indexer.request_reindex(dataset.id);
        }

        self.record_created(ctx, dataset, &stored);
        Ok(stored)
    }

    fn record_created(&self, ctx: &RequestContext, dataset: &Dataset, version: &DatasetVersion) {
        let event = DomainEvent::new(
            Some(ctx.user_id),
            version.created_at.unwrap_or_else(|| self.clock.now()),
            EventPayload::Dataset(DatasetEvent::VersionCreated {
                dataset_id: dataset.id,
                version_id: version.id,
                state: version.state.to_string(),
                file_count: version.file_metadatas.len(),
                history_len: dataset.versions.len(),
            }),
        );

        match event.to_json() {
            Ok(json) => info!(
                user_id = %ctx.user_id,
                username = %ctx.username,
                dataset_id = %dataset.id,
                version_id = %version.id,
                state = %version.state,
                event = %json,
                "Dataset version created"
            ),
            Err(e) => warn!(error = %e, "Failed to serialize version event"),
        }
    }
}
