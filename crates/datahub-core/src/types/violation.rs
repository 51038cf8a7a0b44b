//! Field-level constraint violations reported by dataset validation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The rule a field value broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationRule {
    /// A required field is present but holds no value.
    RequiredMissing,
    /// A value does not match the field's declared type or vocabulary.
    TypeMismatch,
    /// More values were supplied than the field allows.
    Cardinality,
}

impl ViolationRule {
    /// Return the rule as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequiredMissing => "required_missing",
            Self::TypeMismatch => "type_mismatch",
            Self::Cardinality => "cardinality",
        }
    }
}

impl fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single broken constraint, located by metadata block and field name.
///
/// For child fields of a compound value, `field` is the dotted path
/// (`author.authorName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Metadata block holding the field.
    pub block: String,
    /// Field name or dotted child path.
    pub field: String,
    /// The rule that was broken.
    pub rule: ViolationRule,
    /// Human-readable detail.
    pub message: String,
}

impl Violation {
    /// Create a new violation.
    pub fn new(
        block: impl Into<String>,
        field: impl Into<String>,
        rule: ViolationRule,
        message: impl Into<String>,
    ) -> Self {
        Self {
            block: block.into(),
            field: field.into(),
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} ({}): {}",
            self.block, self.field, self.rule, self.message
        )
    }
}
