//! Table metrics
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only when the table is built

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one table
///
/// Counters use Relaxed atomics so a registry can be read through a
/// shared reference while the table is borrowed for a query.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful query count
    queries_executed: AtomicU64,
    /// Queries aborted by condition errors
    queries_rejected: AtomicU64,
    /// Rows examined by filters
    rows_scanned: AtomicU64,
    /// Rows returned in pages
    rows_returned: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    deletes: AtomicU64,
    /// Mutations refused (duplicate key, no match, bad condition)
    mutations_rejected: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    // Query metrics

    /// Record a successful query
    pub fn record_query(&self, scanned: usize, returned: usize) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.rows_scanned.fetch_add(scanned as u64, Ordering::Relaxed);
        self.rows_returned.fetch_add(returned as u64, Ordering::Relaxed);
    }

    /// Increment queries rejected
    pub fn increment_queries_rejected(&self) {
        self.queries_rejected.fetch_add(1, Ordering::Relaxed);
    }

    // Mutation metrics

    pub fn increment_inserts(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_updates(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deletes(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_mutations_rejected(&self) {
        self.mutations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_rejected: self.queries_rejected.load(Ordering::Relaxed),
            rows_scanned: self.rows_scanned.load(Ordering::Relaxed),
            rows_returned: self.rows_returned.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            deletes: self.deletes.load(Ordering::Relaxed),
            mutations_rejected: self.mutations_rejected.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_rejected: u64,
    pub rows_scanned: u64,
    pub rows_returned: u64,
    pub inserts: u64,
    pub updates: u64,
    pub deletes: u64,
    pub mutations_rejected: u64,
}
