//! Constraint checking for field trees.

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use datahub_core::error::AppError;
use datahub_core::types::violation::{Violation, ViolationRule};
use datahub_entity::field::{
    DatasetField, FieldDefinition, FieldTree, FieldType, FieldValue, MetadataSchema,
};

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Checks a field tree against a [`MetadataSchema`].
///
/// Only fields present in the tree are checked. A required field that is
/// absent is not reported; one that is present but empty is. This is why
/// the version workflow validates the initialized tree before tidying it.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    email: Regex,
}

impl FieldValidator {
    /// Creates a validator.
    pub fn new() -> Result<Self, AppError> {
        let email = Regex::new(EMAIL_PATTERN)
            .map_err(|e| AppError::internal(format!("Invalid e-mail pattern: {e}")))?;
        Ok(Self { email })
    }

    /// Returns every violation found in `tree`, in block and field order.
    pub fn validate(&self, tree: &FieldTree, schema: &MetadataSchema) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (block_name, fields) in tree.blocks() {
            let Some(block) = schema.block(block_name) else {
                debug!(block = %block_name, "Skipping block without schema");
                continue;
            };
            for (field_name, field) in fields {
                let Some(def) = block.field(field_name) else {
                    debug!(block = %block_name, field = %field_name, "Skipping field without schema");
                    continue;
                };
                self.check_field(block_name, field_name, def, field, &mut violations);
            }
        }

        violations
    }

    fn check_field(
        &self,
        block: &str,
        path: &str,
        def: &FieldDefinition,
        field: &DatasetField,
        out: &mut Vec<Violation>,
    ) {
        if field.is_empty() {
            if def.required {
                out.push(Violation::new(
                    block,
                    path,
                    ViolationRule::RequiredMissing,
                    format!("{path} is required"),
                ));
            }
            return;
        }

        let values: Vec<&FieldValue> = field.values.iter().filter(|v| !v.is_empty()).collect();

        if !def.allow_multiples && values.len() > 1 {
            out.push(Violation::new(
                block,
                path,
                ViolationRule::Cardinality,
                format!("{path} allows one value, got {}", values.len()),
            ));
        }

        for value in values {
            match (def.field_type, value) {
                (FieldType::Compound, FieldValue::Compound(children)) => {
                    for child_def in &def.children {
                        if let Some(child) = children.get(&child_def.name) {
                            let child_path = format!("{path}.{}", child_def.name);
                            self.check_field(block, &child_path, child_def, child, out);
                        }
                    }
                }
                (FieldType::Compound, _) => out.push(Violation::new(
                    block,
                    path,
                    ViolationRule::TypeMismatch,
                    format!("{path} expects a compound value"),
                )),
                (_, FieldValue::Compound(_)) => out.push(Violation::new(
                    block,
                    path,
                    ViolationRule::TypeMismatch,
                    format!("{path} does not accept a compound value"),
                )),
                (field_type, FieldValue::Primitive(text) | FieldValue::Controlled(text)) => {
                    let text = text.trim();
                    if def.is_controlled() {
                        if !def.controlled_vocabulary.iter().any(|term| term == text) {
                            out.push(Violation::new(
                                block,
                                path,
                                ViolationRule::TypeMismatch,
                                format!("'{text}' is not an allowed term for {path}"),
                            ));
                        }
                    } else if !self.matches_type(field_type, text) {
                        out.push(Violation::new(
                            block,
                            path,
                            ViolationRule::TypeMismatch,
                            format!("'{text}' is not a valid {field_type:?} value for {path}"),
                        ));
                    }
                }
            }
        }
    }

    fn matches_type(&self, field_type: FieldType, text: &str) -> bool {
        match field_type {
            FieldType::Text | FieldType::TextBox | FieldType::Compound => true,
            FieldType::Int => text.parse::<i64>().is_ok(),
            FieldType::Float => text.parse::<f64>().is_ok_and(f64::is_finite),
            FieldType::Date => is_partial_date(text),
            FieldType::Url => url::Url::parse(text).is_ok_and(|u| u.has_host()),
            FieldType::Email => self.email.is_match(text),
        }
    }
}

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn is_partial_date(text: &str) -> bool {
    match text.len() {
        4 => text.bytes().all(|b| b.is_ascii_digit()),
        7 => NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d").is_ok(),
        10 => NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok(),
        _ => false,
    }
}
