//! Dataset (versioned record) entities.

pub mod model;

pub use model::Dataset;
