//! # datahub-core
//!
//! Core crate for DataHub. Contains collaborator traits, configuration
//! schemas, typed identifiers, domain events, field-validation violation
//! types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other DataHub crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
