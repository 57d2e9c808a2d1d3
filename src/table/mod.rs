//! Table subsystem
//!
//! The owned row container with its query surface and mutation ops.
//! Mutations reuse the condition evaluator to locate their target row and
//! complete all validation before touching the rows.

mod config;
mod errors;
mod table;

pub use config::{PostProcess, TableConfig, TableOptions};
pub use errors::{TableError, TableResult};
pub use table::Table;
