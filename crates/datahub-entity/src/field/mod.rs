//! Metadata field values and the block/field schema that describes them.

pub mod schema;
pub mod tree;

pub use schema::{BlockSchema, FieldDefinition, FieldType, MetadataSchema};
pub use tree::{BlockFields, DatasetField, FieldTree, FieldValue};
