//! Hierarchical metadata values: block → field → values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fields of one metadata block, keyed by field name.
pub type BlockFields = BTreeMap<String, DatasetField>;

/// A single value of a metadata field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free-form value (text, number, date, URL, e-mail).
    Primitive(String),
    /// A term from the field's controlled vocabulary.
    Controlled(String),
    /// A group of child fields (e.g. an author with name and affiliation).
    Compound(BTreeMap<String, DatasetField>),
}

impl FieldValue {
    /// Whether the value carries no content. Whitespace counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Primitive(s) | Self::Controlled(s) => s.trim().is_empty(),
            Self::Compound(children) => children.values().all(DatasetField::is_empty),
        }
    }
}

/// The values held by one field. Fields that allow multiples hold several.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetField {
    /// Values in entry order.
    #[serde(default)]
    pub values: Vec<FieldValue>,
}

impl DatasetField {
    /// A field with no values.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A field with one primitive value.
    pub fn primitive(value: impl Into<String>) -> Self {
        Self {
            values: vec![FieldValue::Primitive(value.into())],
        }
    }

    /// A field with several primitive values.
    pub fn primitives<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values
                .into_iter()
                .map(|v| FieldValue::Primitive(v.into()))
                .collect(),
        }
    }

    /// A field with one controlled-vocabulary term.
    pub fn controlled(term: impl Into<String>) -> Self {
        Self {
            values: vec![FieldValue::Controlled(term.into())],
        }
    }

    /// A field with one compound value built from `(child name, child field)` pairs.
    pub fn compound<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = (S, DatasetField)>,
        S: Into<String>,
    {
        Self {
            values: vec![FieldValue::Compound(
                children.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            )],
        }
    }

    /// Whether every value is empty (or there are none).
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(FieldValue::is_empty)
    }
}

/// All metadata values of a version, grouped by block name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldTree {
    blocks: BTreeMap<String, BlockFields>,
}

impl FieldTree {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FieldTree::set_field`].
    pub fn with_field(
        mut self,
        block: impl Into<String>,
        field: impl Into<String>,
        value: DatasetField,
    ) -> Self {
        self.set_field(block, field, value);
        self
    }

    /// Insert or replace a field, creating its block when absent.
    pub fn set_field(
        &mut self,
        block: impl Into<String>,
        field: impl Into<String>,
        value: DatasetField,
    ) {
        self.blocks
            .entry(block.into())
            .or_default()
            .insert(field.into(), value);
    }

    /// Look up a field.
    pub fn field(&self, block: &str, field: &str) -> Option<&DatasetField> {
        self.blocks.get(block).and_then(|fields| fields.get(field))
    }

    /// Look up a block.
    pub fn block(&self, name: &str) -> Option<&BlockFields> {
        self.blocks.get(name)
    }

    /// Get a block for editing, creating it when absent.
    pub fn block_entry(&mut self, name: &str) -> &mut BlockFields {
        self.blocks.entry(name.to_string()).or_default()
    }

    /// Whether the tree has a block with this name (even an empty one).
    pub fn has_block(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    /// Iterate blocks in name order.
    pub fn blocks(&self) -> impl Iterator<Item = (&String, &BlockFields)> {
        self.blocks.iter()
    }

    /// Iterate blocks mutably in name order.
    pub fn blocks_mut(&mut self) -> impl Iterator<Item = (&String, &mut BlockFields)> {
        self.blocks.iter_mut()
    }

    /// Keep only the blocks for which `keep` returns `true`.
    pub fn retain_blocks<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str, &mut BlockFields) -> bool,
    {
        self.blocks.retain(|name, fields| keep(name, fields));
    }

    /// Total number of fields across all blocks.
    pub fn field_count(&self) -> usize {
        self.blocks.values().map(BTreeMap::len).sum()
    }

    /// Whether the tree has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
