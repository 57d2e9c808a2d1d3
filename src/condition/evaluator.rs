//! Condition tree evaluation
//!
//! Decides whether a row satisfies a condition tree:
//! - Branches combine every child with AND (vacuously true) or OR
//!   (vacuously false)
//! - Leaves are validated, then compared case-insensitively for string
//!   values or structurally for everything else
//! - Absent, null or empty-string expected values never exclude a row

use serde_json::{Number, Value};

use super::errors::ConditionResult;
use super::path::resolve_path;
use super::types::{Condition, ConditionItem, ConditionNode, FieldType, Logic};
use super::validator::ConditionValidator;
use super::value::{display_string, is_blank, parse_number, values_equal};

/// Evaluates condition trees against rows
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Checks if a row satisfies a condition tree.
    ///
    /// Every child of a branch is evaluated, so a validation failure
    /// anywhere in the tree surfaces regardless of sibling results.
    pub fn evaluate(row: &Value, condition: &Condition) -> ConditionResult<bool> {
        match condition {
            Condition::Leaf(item) => Self::evaluate_leaf(row, item),
            Condition::Branch(node) => Self::evaluate_branch(row, node),
        }
    }

    fn evaluate_branch(row: &Value, node: &ConditionNode) -> ConditionResult<bool> {
        let results = node
            .conditions
            .iter()
            .map(|child| Self::evaluate(row, child))
            .collect::<ConditionResult<Vec<bool>>>()?;

        Ok(match node.logic {
            Logic::And => results.iter().all(|r| *r),
            Logic::Or => results.iter().any(|r| *r),
        })
    }

    fn evaluate_leaf(row: &Value, item: &ConditionItem) -> ConditionResult<bool> {
        ConditionValidator::validate(item)?;

        // Blank expected values (absent, null, "") admit every row
        let expected = match item.value.as_ref() {
            Some(v) if !is_blank(Some(v)) => Self::coerce(v, item.field_type),
            _ => return Ok(true),
        };

        let actual = resolve_path(row, &item.field);

        Ok(match &expected {
            Value::String(pattern) => {
                let actual = display_string(actual).to_uppercase();
                let pattern = pattern.to_uppercase();
                if item.like {
                    actual.contains(&pattern)
                } else {
                    actual == pattern
                }
            }
            other => actual.is_some_and(|v| values_equal(v, other)),
        })
    }

    /// Applies the declared type to a string value before comparison.
    ///
    /// `{"id": "5", "type": "number"}` compares as the number 5 and
    /// `{"flag": "true", "type": "boolean"}` as the boolean `true`.
    fn coerce(value: &Value, field_type: Option<FieldType>) -> Value {
        match (field_type, value) {
            (Some(FieldType::Number), Value::String(s)) => parse_number(s)
                .and_then(Number::from_f64)
                .map_or_else(|| value.clone(), Value::Number),
            (Some(FieldType::Boolean), Value::String(s)) => match s.as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => value.clone(),
            },
            _ => value.clone(),
        }
    }
}
