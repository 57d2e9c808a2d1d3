//! Leaf predicate validation
//!
//! Validation semantics:
//! - The leaf names exactly one field that is not a modifier key
//! - `required` leaves carry a value that is not absent, null or ""
//! - A declared type accepts the value (numeric strings pass as numbers,
//!   "true"/"false" pass as booleans)
//!
//! The validator never mutates the predicate. It only gates evaluation.

use serde_json::Value;

use super::errors::{ConditionError, ConditionResult};
use super::types::{ConditionItem, FieldType, MODIFIER_KEYS};
use super::value::{is_blank, json_type_name, parse_number};

/// Checks leaf predicates before they are evaluated
pub struct ConditionValidator;

impl ConditionValidator {
    /// Validates a leaf predicate.
    ///
    /// # Errors
    ///
    /// - `InvalidConditionShape` if the field key is empty or reserved
    /// - `MissingRequiredField` if `required` is set and the value is blank
    /// - `TypeMismatch` if a declared type rejects a supplied value
    pub fn validate(item: &ConditionItem) -> ConditionResult<()> {
        if item.field.is_empty() || MODIFIER_KEYS.contains(&item.field.as_str()) {
            return Err(ConditionError::invalid_shape(format!(
                "no field key found (got '{}')",
                item.field
            )));
        }

        let value = item.value.as_ref();

        if item.required && is_blank(value) {
            return Err(ConditionError::MissingRequiredField(item.field.clone()));
        }

        // Blank values skip type checks; they make the leaf a no-op
        if let (Some(field_type), Some(v)) = (item.field_type, value) {
            if !is_blank(Some(v)) && !Self::accepts(field_type, v) {
                return Err(ConditionError::TypeMismatch {
                    key: item.field.clone(),
                    expected: field_type.type_name().to_string(),
                    actual: json_type_name(v).to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns true if `value` satisfies `field_type`
    fn accepts(field_type: FieldType, value: &Value) -> bool {
        match (field_type, value) {
            (FieldType::String, Value::String(_)) => true,
            (FieldType::Number, Value::Number(_)) => true,
            (FieldType::Number, Value::String(s)) => parse_number(s).is_some(),
            (FieldType::Boolean, Value::Bool(_)) => true,
            (FieldType::Boolean, Value::String(s)) => s == "true" || s == "false",
            _ => false,
        }
    }
}
