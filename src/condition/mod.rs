//! Condition subsystem
//!
//! Condition trees select rows. A tree is a tagged union of leaf predicates
//! and AND/OR branches; evaluation walks it recursively against one row.
//!
//! # Evaluation Flow
//!
//! 1. Branches evaluate every child, then combine with AND or OR
//! 2. Leaves are validated (shape, required, declared type)
//! 3. Blank expected values pass every row
//! 4. String values match case-insensitively (equality or substring)
//! 5. Other values match by structural equality

mod adapter;
mod errors;
mod evaluator;
mod path;
mod types;
mod validator;
mod value;

pub use errors::{ConditionError, ConditionResult};
pub use evaluator::ConditionEvaluator;
pub use path::resolve_path;
pub use types::{Condition, ConditionItem, ConditionNode, FieldType, Logic, MODIFIER_KEYS};
pub use validator::ConditionValidator;
pub use value::{display_string, json_type_name, values_equal};
