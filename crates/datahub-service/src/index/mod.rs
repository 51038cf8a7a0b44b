//! Search-index collaborator and its fire-and-forget dispatcher.

pub mod dispatcher;

pub use dispatcher::{DatasetIndexer, IndexDispatcher};
