//! Dataset version entities.

pub mod model;
pub mod state;

pub use model::DatasetVersion;
pub use state::VersionState;
