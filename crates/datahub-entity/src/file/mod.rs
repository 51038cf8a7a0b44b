//! Per-version file metadata.

pub mod metadata;

pub use metadata::FileMetadata;
