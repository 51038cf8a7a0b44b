//! Field-tree initialization, normalization and validation.

pub mod normalizer;
pub mod validator;

pub use normalizer::FieldNormalizer;
pub use validator::FieldValidator;
