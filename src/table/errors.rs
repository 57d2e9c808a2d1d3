//! # Table Errors
//!
//! All failures surface synchronously at the call that triggered them.
//! A failed mutation never leaves the table partially modified.

use serde_json::Value;
use thiserror::Error;

use crate::condition::ConditionError;

/// Result type for table operations
pub type TableResult<T> = Result<T, TableError>;

/// Table errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Condition validation failed
    #[error("{0}")]
    Condition(#[from] ConditionError),

    /// Insert collides with an existing primary key value
    #[error("Duplicate key: {key} = {value}")]
    DuplicateKey { key: String, value: Value },

    /// Update/delete matched no row
    #[error("No row matches the given conditions")]
    ConditionNotFound,

    /// Request payload could not be parsed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration could not be loaded or is invalid
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl TableError {
    /// Returns the stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            TableError::Condition(err) => err.code(),
            TableError::DuplicateKey { .. } => "TABLE_DUPLICATE_KEY",
            TableError::ConditionNotFound => "TABLE_CONDITION_NOT_FOUND",
            TableError::InvalidRequest(_) => "TABLE_INVALID_REQUEST",
            TableError::InvalidConfig(_) => "TABLE_INVALID_CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(TableError::ConditionNotFound.code(), "TABLE_CONDITION_NOT_FOUND");
        assert_eq!(
            TableError::DuplicateKey {
                key: "id".into(),
                value: json!(1)
            }
            .code(),
            "TABLE_DUPLICATE_KEY"
        );
    }

    #[test]
    fn test_condition_error_propagation() {
        let err = TableError::from(ConditionError::MissingRequiredField("id".into()));
        assert_eq!(err.code(), "CONDITION_MISSING_REQUIRED_FIELD");
        assert_eq!(err.to_string(), "Missing required field: id");
    }

    #[test]
    fn test_duplicate_key_display() {
        let err = TableError::DuplicateKey {
            key: "id".into(),
            value: json!("u1"),
        };
        assert_eq!(err.to_string(), "Duplicate key: id = \"u1\"");
    }
}
