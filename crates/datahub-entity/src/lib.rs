//! # datahub-entity
//!
//! Domain entity models for DataHub. A [`dataset::Dataset`] exclusively
//! owns its ordered [`version::DatasetVersion`] history; every
//! back-reference (version to dataset, file metadata to version, file
//! metadata to data file) is an identifier rather than a pointer.

pub mod dataset;
pub mod field;
pub mod file;
pub mod version;
