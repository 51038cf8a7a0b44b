//! Structural initialization and tidying of field trees.

use datahub_entity::field::{
    BlockFields, DatasetField, FieldDefinition, FieldTree, FieldType, FieldValue, MetadataSchema,
};

/// Fills and strips placeholder values in a [`FieldTree`].
///
/// `initialize` and `normalize` are two halves of one pipeline: the
/// version workflow initializes, validates the initialized tree, and only
/// then normalizes with `strip_empty` so that present-but-empty required
/// fields are still visible to validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldNormalizer;

impl FieldNormalizer {
    /// Creates a normalizer.
    pub fn new() -> Self {
        Self
    }

    /// Adds an empty placeholder for every schema block and field missing
    /// from `tree`. Existing fields without values get one blank value, and
    /// compound values get blank entries for missing children.
    pub fn initialize(&self, tree: &mut FieldTree, schema: &MetadataSchema) {
        for block in &schema.blocks {
            let fields = tree.block_entry(&block.name);
            for def in &block.fields {
                match fields.get_mut(&def.name) {
                    Some(field) => initialize_field(field, def),
                    None => {
                        fields.insert(def.name.clone(), def.placeholder());
                    }
                }
            }
        }
    }

    /// Tidies `tree` in place.
    ///
    /// Surrounding whitespace is always trimmed from text values. With
    /// `strip_empty`, empty values, empty compound values, fields left
    /// without values and blocks left without fields are removed.
    /// Applying it twice gives the same tree as applying it once.
    pub fn normalize(&self, tree: &mut FieldTree, strip_empty: bool) {
        tree.retain_blocks(|_, fields| {
            tidy_fields(fields, strip_empty);
            !(strip_empty && fields.is_empty())
        });
    }
}

fn initialize_field(field: &mut DatasetField, def: &FieldDefinition) {
    if field.values.is_empty() {
        field.values = def.placeholder().values;
        return;
    }
    if def.field_type != FieldType::Compound {
        return;
    }
    for value in &mut field.values {
        if let FieldValue::Compound(children) = value {
            for child_def in &def.children {
                match children.get_mut(&child_def.name) {
                    Some(child) => initialize_field(child, child_def),
                    None => {
                        children.insert(child_def.name.clone(), child_def.placeholder());
                    }
                }
            }
        }
    }
}

fn tidy_fields(fields: &mut BlockFields, strip_empty: bool) {
    fields.retain(|_, field| {
        tidy_field(field, strip_empty);
        !(strip_empty && field.values.is_empty())
    });
}

fn tidy_field(field: &mut DatasetField, strip_empty: bool) {
    for value in &mut field.values {
        match value {
            FieldValue::Primitive(text) | FieldValue::Controlled(text) => {
                let trimmed = text.trim();
                if trimmed.len() != text.len() {
                    *text = trimmed.to_string();
                }
            }
            FieldValue::Compound(children) => tidy_fields(children, strip_empty),
        }
    }
    if strip_empty {
        field.values.retain(|value| !value.is_empty());
    }
}
