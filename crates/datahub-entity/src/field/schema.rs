//! Metadata block schema: which fields exist, their types and rules.

use serde::{Deserialize, Serialize};

use crate::field::tree::{DatasetField, FieldValue};

/// Declared value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text.
    Text,
    /// Multi-line text.
    TextBox,
    /// Integer.
    Int,
    /// Floating-point number.
    Float,
    /// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    Date,
    /// Absolute URL.
    Url,
    /// E-mail address.
    Email,
    /// Group of child fields.
    Compound,
}

/// Definition of one field within a block (or within a compound field).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name, unique within its parent.
    pub name: String,
    /// Declared value type.
    pub field_type: FieldType,
    /// Whether a present field must hold a non-empty value.
    #[serde(default)]
    pub required: bool,
    /// Whether more than one value is allowed.
    #[serde(default)]
    pub allow_multiples: bool,
    /// Allowed terms; empty means the field is not vocabulary-controlled.
    #[serde(default)]
    pub controlled_vocabulary: Vec<String>,
    /// Child definitions of a compound field.
    #[serde(default)]
    pub children: Vec<FieldDefinition>,
}

impl FieldDefinition {
    /// A field of the given primitive type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            allow_multiples: false,
            controlled_vocabulary: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A single-line text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// A compound field with the given children.
    pub fn compound(name: impl Into<String>, children: Vec<FieldDefinition>) -> Self {
        Self {
            children,
            ..Self::new(name, FieldType::Compound)
        }
    }

    /// A text field restricted to `terms`.
    pub fn controlled<I, S>(name: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            controlled_vocabulary: terms.into_iter().map(Into::into).collect(),
            ..Self::new(name, FieldType::Text)
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow several values.
    pub fn multiple(mut self) -> Self {
        self.allow_multiples = true;
        self
    }

    /// Whether values must come from a controlled vocabulary.
    pub fn is_controlled(&self) -> bool {
        !self.controlled_vocabulary.is_empty()
    }

    /// Look up a child definition of a compound field.
    pub fn child(&self, name: &str) -> Option<&FieldDefinition> {
        self.children.iter().find(|c| c.name == name)
    }

    /// An empty placeholder with the structure this definition expects:
    /// one blank value, and for compounds one blank value per child.
    pub fn placeholder(&self) -> DatasetField {
        let value = if self.field_type == FieldType::Compound {
            FieldValue::Compound(
                self.children
                    .iter()
                    .map(|child| (child.name.clone(), child.placeholder()))
                    .collect(),
            )
        } else if self.is_controlled() {
            FieldValue::Controlled(String::new())
        } else {
            FieldValue::Primitive(String::new())
        };
        DatasetField {
            values: vec![value],
        }
    }
}

/// Definition of one metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSchema {
    /// Block name (`citation`, `geospatial`, ...).
    pub name: String,
    /// Field definitions in display order.
    pub fields: Vec<FieldDefinition>,
}

impl BlockSchema {
    /// A block with the given fields.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Look up a field definition.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The metadata blocks enabled for a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSchema {
    /// Enabled blocks.
    pub blocks: Vec<BlockSchema>,
}

impl MetadataSchema {
    /// A schema made of `blocks`.
    pub fn new(blocks: Vec<BlockSchema>) -> Self {
        Self { blocks }
    }

    /// Look up a block definition.
    pub fn block(&self, name: &str) -> Option<&BlockSchema> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// Look up a field definition.
    pub fn field(&self, block: &str, field: &str) -> Option<&FieldDefinition> {
        self.block(block).and_then(|b| b.field(field))
    }
}
