//! Observability subsystem
//!
//! This module provides:
//! - Structured logging (JSON lines on stderr)
//! - Per-table counters
//! - Typed lifecycle events
//!
//! Logging and counting never change query or mutation results. A
//! rejected request is counted and logged before its error is returned.
//!
//! # Usage
//!
//! ```ignore
//! use mocktable::observability::{Event, Logger, MetricsRegistry};
//!
//! Logger::info(Event::RowInserted.as_str(), &[("rows", "42")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.record_query(42, 10);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
