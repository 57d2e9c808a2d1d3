//! Condition error types
//!
//! Error codes:
//! - CONDITION_INVALID_SHAPE
//! - CONDITION_MISSING_REQUIRED_FIELD
//! - CONDITION_TYPE_MISMATCH

use thiserror::Error;

/// Result type for condition validation and evaluation
pub type ConditionResult<T> = Result<T, ConditionError>;

/// Failures raised while validating or evaluating a condition tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// Leaf has no identifiable field key, or the loose shape is malformed
    #[error("Invalid condition shape: {0}")]
    InvalidConditionShape(String),

    /// A `required` leaf carries no usable value
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Leaf value does not satisfy its declared type
    #[error("Type mismatch on '{key}': expected {expected}, found {actual}")]
    TypeMismatch {
        key: String,
        expected: String,
        actual: String,
    },
}

impl ConditionError {
    /// Shape error with a reason
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        ConditionError::InvalidConditionShape(reason.into())
    }

    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            ConditionError::InvalidConditionShape(_) => "CONDITION_INVALID_SHAPE",
            ConditionError::MissingRequiredField(_) => "CONDITION_MISSING_REQUIRED_FIELD",
            ConditionError::TypeMismatch { .. } => "CONDITION_TYPE_MISMATCH",
        }
    }
}
