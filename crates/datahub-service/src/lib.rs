//! # datahub-service
//!
//! Business logic for dataset versioning. [`VersionWorkflow`] composes the
//! draft-uniqueness rule, the system-block guard, file-metadata
//! propagation and the `initialize → validate → normalize` field pipeline,
//! then writes through a [`datahub_database::VersionStore`] and requests a
//! reindex without waiting for it.
//!
//! Services follow constructor injection: collaborators are supplied as
//! `Arc` trait objects when the service is built.

pub mod context;
pub mod field;
pub mod index;
pub mod version;

pub use context::RequestContext;
pub use field::{FieldNormalizer, FieldValidator};
pub use index::{DatasetIndexer, IndexDispatcher};
pub use version::{
    ConfiguredKeyAuthority, CreateVersionRequest, SystemMetadataGuard, VersionWorkflow,
};
