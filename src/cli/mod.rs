//! CLI module
//!
//! Provides command-line interface for:
//! - query: one-shot query against a rows file
//! - serve: line-delimited JSON operations against one in-memory table

mod args;
mod commands;
mod errors;
mod io;

use crate::observability::{Event, Logger};

pub use args::{Cli, Command};
pub use commands::{execute, load_table, query, run_command, serve, serve_session, Operation};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};

/// Parse process arguments and run the selected command.
///
/// A failure is logged at FATAL before it is returned to `main`.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command).map_err(|err| {
        Logger::fatal(
            Event::CommandFailed.as_str(),
            &[("code", err.code_str()), ("message", err.message())],
        );
        err
    })
}
