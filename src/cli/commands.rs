//! CLI command implementations
//!
//! Both commands build one table from a JSON rows file and an optional
//! config file. `query` answers a single request; `serve` answers one
//! operation per stdin line until EOF. A failed operation is reported on
//! its own response line and does not end the session.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::condition::Condition;
use crate::observability::{Event, Logger};
use crate::query::QueryRequest;
use crate::table::{Table, TableConfig, TableOptions};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// One line-protocol operation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// `get_rows` with the request shape of `QueryRequest::from_json`
    SelectRows {
        #[serde(default)]
        query: Value,
    },
    SelectRow {
        conditions: Value,
    },
    InsertRow {
        item: Value,
    },
    /// Replaces the first match with `item`, or removes it if `item` is absent
    UpdateRow {
        conditions: Value,
        #[serde(default)]
        item: Option<Value>,
    },
    DeleteRow {
        conditions: Value,
    },
    /// Returns every row
    Dump,
    /// Returns the table counters
    Metrics,
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Query {
            data,
            config,
            request,
        } => query(&data, config.as_deref(), request.as_deref()),
        Command::Serve { data, config } => serve(&data, config.as_deref()),
    }
}

/// Build a table from a rows file and an optional config file
pub fn load_table(data: &Path, config: Option<&Path>) -> CliResult<Table> {
    let config = match config {
        Some(path) => {
            let config = TableConfig::load(path)?;
            Logger::set_min_severity(config.log_level());
            Logger::info(
                Event::ConfigLoaded.as_str(),
                &[("path", &path.display().to_string())],
            );
            config
        }
        None => TableConfig::default(),
    };

    let content = fs::read_to_string(data)
        .map_err(|e| CliError::data_error(format!("Failed to read data: {}", e)))?;
    let rows: Vec<Value> = serde_json::from_str(&content)
        .map_err(|e| CliError::data_error(format!("Data must be a JSON array: {}", e)))?;

    Ok(Table::with_options(rows, TableOptions::from_config(&config)))
}

/// Run one query and print its output
pub fn query(data: &Path, config: Option<&Path>, request: Option<&str>) -> CliResult<()> {
    let table = load_table(data, config)?;

    let request = match request {
        Some(text) => serde_json::from_str(text)?,
        None => read_request(&mut io::stdin().lock())?,
    };

    let output = table.get_rows(&QueryRequest::from_json(&request)?)?;
    write_response(&mut io::stdout().lock(), serde_json::to_value(output)?)
}

/// Serve operations from stdin until EOF
pub fn serve(data: &Path, config: Option<&Path>) -> CliResult<()> {
    let mut table = load_table(data, config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();

    Logger::info(
        Event::Serving.as_str(),
        &[("rows", &table.len().to_string())],
    );
    let handled = serve_session(&mut table, stdin.lock(), &mut stdout.lock())?;
    Logger::info(
        Event::ServeComplete.as_str(),
        &[("requests", &handled.to_string())],
    );
    Ok(())
}

/// Answer every request line from `reader`, returning how many were handled.
///
/// Blank lines are skipped. Only I/O failures on the streams themselves
/// end the session; a failed read is logged at ERROR before returning.
pub fn serve_session<R: BufRead, W: Write>(
    table: &mut Table,
    reader: R,
    writer: &mut W,
) -> CliResult<usize> {
    let mut handled = 0;

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                Logger::error(
                    Event::ServeAborted.as_str(),
                    &[
                        ("requests", &handled.to_string()),
                        ("message", &err.to_string()),
                    ],
                );
                return Err(err.into());
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        handled += 1;

        match handle_line(table, &line) {
            Ok(data) => write_response(writer, data)?,
            Err(err) => {
                Logger::warn(
                    Event::RequestFailed.as_str(),
                    &[("code", err.code_str()), ("message", err.message())],
                );
                write_error(writer, err.code_str(), err.message())?;
            }
        }
    }

    Ok(handled)
}

fn handle_line(table: &mut Table, line: &str) -> CliResult<Value> {
    let operation: Operation = serde_json::from_str(line)?;
    execute(table, operation)
}

/// Apply one operation to the table
pub fn execute(table: &mut Table, operation: Operation) -> CliResult<Value> {
    match operation {
        Operation::SelectRows { query } => {
            let output = table.get_rows(&QueryRequest::from_json(&query)?)?;
            Ok(serde_json::to_value(output)?)
        }
        Operation::SelectRow { conditions } => {
            let conditions = Condition::from_json(&conditions)?;
            Ok(table.select_row(&conditions)?.cloned().unwrap_or(Value::Null))
        }
        Operation::InsertRow { item } => Ok(table.insert_row(item)?.clone()),
        Operation::UpdateRow { conditions, item } => {
            let conditions = Condition::from_json(&conditions)?;
            Ok(Value::Bool(table.update_row(&conditions, item)?))
        }
        Operation::DeleteRow { conditions } => {
            let conditions = Condition::from_json(&conditions)?;
            Ok(Value::Bool(table.delete_row(&conditions)?))
        }
        Operation::Dump => Ok(Value::Array(table.data_source().to_vec())),
        Operation::Metrics => Ok(serde_json::to_value(table.metrics().snapshot())?),
    }
}
