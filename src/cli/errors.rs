//! CLI-specific error types

use std::fmt;
use std::io;

use crate::condition::ConditionError;
use crate::table::TableError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// Row data file error
    DataError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Request line is not a valid operation
    InvalidRequest,
    /// Table operation failed; carries the table error code
    Table(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "MOCKTABLE_CLI_CONFIG_ERROR",
            Self::DataError => "MOCKTABLE_CLI_DATA_ERROR",
            Self::IoError => "MOCKTABLE_CLI_IO_ERROR",
            Self::InvalidRequest => "MOCKTABLE_CLI_INVALID_REQUEST",
            Self::Table(code) => code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Data file error
    pub fn data_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::DataError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid request
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidRequest, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_request(format!("JSON error: {}", e))
    }
}

impl From<TableError> for CliError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::InvalidConfig(msg) => Self::config_error(msg),
            other => Self::new(CliErrorCode::Table(other.code()), other.to_string()),
        }
    }
}

impl From<ConditionError> for CliError {
    fn from(e: ConditionError) -> Self {
        Self::from(TableError::from(e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
