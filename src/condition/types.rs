//! Condition grammar
//!
//! A condition is either a leaf predicate on one field or a branch that
//! combines child conditions with AND/OR.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reserved leaf keys that are modifiers, never field names
pub const MODIFIER_KEYS: [&str; 3] = ["type", "required", "like"];

/// Declared type of a leaf predicate's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
}

impl FieldType {
    /// Returns the type name used in the loose shape and in errors
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }

    /// Parses a type name from the loose shape
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(FieldType::String),
            "number" => Some(FieldType::Number),
            "boolean" => Some(FieldType::Boolean),
            _ => None,
        }
    }
}

/// How a branch combines its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Logic {
    /// All children must pass; vacuously true with no children
    #[default]
    And,
    /// Any child must pass; vacuously false with no children
    Or,
}

impl Logic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

/// A leaf predicate on a single field
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionItem {
    /// Field name, possibly a dotted path
    pub field: String,
    /// Expected value; `None` means the predicate is absent
    pub value: Option<Value>,
    /// Declared value type
    pub field_type: Option<FieldType>,
    /// Whether a usable value must be supplied
    pub required: bool,
    /// Substring match instead of equality (string values only)
    pub like: bool,
}

impl ConditionItem {
    /// Equality predicate
    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self {
            field: field.into(),
            value: Some(value),
            field_type: None,
            required: false,
            like: false,
        }
    }

    /// Case-insensitive substring predicate
    pub fn like(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            like: true,
            ..Self::eq(field, Value::String(value.into()))
        }
    }

    /// Predicate whose value was never supplied
    pub fn absent(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: None,
            field_type: None,
            required: false,
            like: false,
        }
    }

    /// Marks the predicate as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Declares the expected value type
    pub fn typed(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }
}

/// A branch combining child conditions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConditionNode {
    pub logic: Logic,
    pub conditions: Vec<Condition>,
}

/// A condition tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf(ConditionItem),
    Branch(ConditionNode),
}

impl Condition {
    /// AND branch over the given children
    pub fn and(conditions: impl IntoIterator<Item = impl Into<Condition>>) -> Self {
        Self::branch(Logic::And, conditions)
    }

    /// OR branch over the given children
    pub fn or(conditions: impl IntoIterator<Item = impl Into<Condition>>) -> Self {
        Self::branch(Logic::Or, conditions)
    }

    /// Branch with explicit logic
    pub fn branch(logic: Logic, conditions: impl IntoIterator<Item = impl Into<Condition>>) -> Self {
        Condition::Branch(ConditionNode {
            logic,
            conditions: conditions.into_iter().map(Into::into).collect(),
        })
    }

    /// Returns true for leaf predicates
    pub fn is_leaf(&self) -> bool {
        matches!(self, Condition::Leaf(_))
    }
}

impl From<ConditionItem> for Condition {
    fn from(item: ConditionItem) -> Self {
        Condition::Leaf(item)
    }
}

impl From<ConditionNode> for Condition {
    fn from(node: ConditionNode) -> Self {
        Condition::Branch(node)
    }
}

/// A flat list is implicitly an AND branch over its elements
impl From<Vec<Condition>> for Condition {
    fn from(conditions: Vec<Condition>) -> Self {
        Condition::Branch(ConditionNode {
            logic: Logic::And,
            conditions,
        })
    }
}

impl From<Vec<ConditionItem>> for Condition {
    fn from(items: Vec<ConditionItem>) -> Self {
        Condition::and(items)
    }
}
