//! Core type definitions used across the DataHub workspace.

pub mod id;
pub mod violation;

pub use id::*;
pub use violation::{Violation, ViolationRule};
