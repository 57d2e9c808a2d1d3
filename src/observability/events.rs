//! Observable events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Table built from its initial rows
    TableLoaded,
    /// Configuration loaded
    ConfigLoaded,
    /// Line protocol session started
    Serving,
    /// Line protocol session ended
    ServeComplete,
    /// Line protocol session ended by a stream failure
    ServeAborted,
    /// Command failed, process exits non-zero
    CommandFailed,

    // Queries
    /// Query executed successfully
    QueryExecuted,
    /// Query aborted by a condition failure
    QueryRejected,

    // Mutations
    /// Row appended
    RowInserted,
    /// Row replaced
    RowUpdated,
    /// Row removed
    RowDeleted,
    /// Mutation refused, table unchanged
    MutationRejected,

    // Protocol
    /// Request line could not be handled
    RequestFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::TableLoaded => "TABLE_LOADED",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "MOCKTABLE_SERVING",
            Event::ServeComplete => "SERVE_COMPLETE",
            Event::ServeAborted => "SERVE_ABORTED",
            Event::CommandFailed => "COMMAND_FAILED",
            Event::QueryExecuted => "QUERY_EXECUTED",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::RowInserted => "ROW_INSERTED",
            Event::RowUpdated => "ROW_UPDATED",
            Event::RowDeleted => "ROW_DELETED",
            Event::MutationRejected => "MUTATION_REJECTED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
