//! File-metadata propagation between versions.

use datahub_entity::file::FileMetadata;
use datahub_entity::version::DatasetVersion;

/// Copies every file metadata entry of `source` as a new wrapper bound to
/// `target`, in the same order. The data files themselves are shared and
/// `source` is left untouched.
pub fn clone_all(source: &DatasetVersion, target: &DatasetVersion) -> Vec<FileMetadata> {
    source
        .file_metadatas
        .iter()
        .map(|fmd| fmd.copy_for(target.id))
        .collect()
}
