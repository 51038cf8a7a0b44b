//! # datahub-database
//!
//! The persistence contract the version workflow writes through
//! ([`store::VersionStore`]) and an in-memory implementation with
//! optimistic revision checks ([`memory::MemoryVersionStore`]).

pub mod memory;
pub mod store;

pub use memory::MemoryVersionStore;
pub use store::VersionStore;
