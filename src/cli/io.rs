//! JSON I/O handling for CLI
//!
//! - Input: one JSON value per line
//! - Output: one JSON object per line
//! - UTF-8 only

use std::io::{BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read one JSON request line
pub fn read_request<R: BufRead>(reader: &mut R) -> CliResult<Value> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    if line.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&line)?;
    Ok(value)
}

/// Write a success response
pub fn write_response<W: Write>(writer: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(writer: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    serde_json::to_writer(&mut *writer, &response)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(())
}
