//! Ordered version history of a dataset and its single-draft rule.
//!
//! A dataset holds at most one draft, and when it does that draft is the
//! most recent version. The checks here are pure; only [`prepend`] and
//! [`remove_head`] mutate.

use tracing::warn;

use datahub_core::error::AppError;
use datahub_core::result::AppResult;
use datahub_core::types::id::DatasetVersionId;
use datahub_entity::dataset::Dataset;
use datahub_entity::version::DatasetVersion;

/// The most recent version, if any.
pub fn most_recent(dataset: &Dataset) -> Option<&DatasetVersion> {
    dataset.latest_version()
}

/// Whether the most recent version is a draft.
pub fn has_pending_draft(dataset: &Dataset) -> bool {
    most_recent(dataset).is_some_and(DatasetVersion::is_working_copy)
}

/// Whether the whole history satisfies the single-draft rule.
pub fn is_consistent(dataset: &Dataset) -> bool {
    dataset
        .versions
        .iter()
        .enumerate()
        .all(|(index, version)| index == 0 || !version.is_working_copy())
}

/// Rejects a candidate that would break the history: one already in it,
/// or a second draft while a draft is pending. A non-draft candidate is
/// accepted while a draft is pending.
pub fn check_draft_invariant(dataset: &Dataset, candidate: &DatasetVersion) -> AppResult<()> {
    if dataset.contains_version(candidate.id) {
        return Err(AppError::conflict(format!(
            "Version {} is already part of dataset {}",
            candidate.id, dataset.id
        )));
    }

    if has_pending_draft(dataset) && candidate.is_working_copy() {
        warn!(dataset_id = %dataset.id, "Rejected duplicate draft");
        return Err(AppError::conflict(
            "duplicate draft: latest version is already a draft, cannot add another draft",
        ));
    }

    Ok(())
}

/// Makes `version` the most recent entry.
pub fn prepend(dataset: &mut Dataset, version: DatasetVersion) {
    dataset.versions.insert(0, version);
}

/// Removes the most recent entry if it has the given ID.
pub fn remove_head(dataset: &mut Dataset, id: DatasetVersionId) -> Option<DatasetVersion> {
    if most_recent(dataset).map(|v| v.id) == Some(id) {
        Some(dataset.versions.remove(0))
    } else {
        None
    }
}
