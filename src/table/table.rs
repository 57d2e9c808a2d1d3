//! The owned table container
//!
//! A `Table` owns an ordered row sequence. Insertion order is the default
//! result order and the tie-break order for sorting.
//!
//! `data_source_mut` is an escape hatch: it hands out the live rows for
//! direct, unvalidated mutation. Primary keys are not rechecked for rows
//! changed that way.

use std::borrow::Borrow;
use std::fmt;

use serde_json::Value;

use super::config::TableOptions;
use super::errors::{TableError, TableResult};
use crate::condition::{resolve_path, values_equal, Condition, ConditionEvaluator};
use crate::observability::{Event, Logger, MetricsRegistry, Severity};
use crate::query::{Pagination, QueryOutput, QueryPipeline, QueryRequest, RowSorter, SortKeys};

/// An in-memory, schema-less table
pub struct Table {
    rows: Vec<Value>,
    options: TableOptions,
    metrics: MetricsRegistry,
}

impl Table {
    /// Creates a table with default options
    pub fn new(rows: Vec<Value>) -> Self {
        Self::with_options(rows, TableOptions::default())
    }

    /// Creates a table with explicit options
    pub fn with_options(rows: Vec<Value>, options: TableOptions) -> Self {
        Logger::trace(
            Event::TableLoaded.as_str(),
            &[
                ("rows", &rows.len().to_string()),
                ("primary_key", options.primary_key.as_deref().unwrap_or("")),
            ],
        );

        Self {
            rows,
            options,
            metrics: MetricsRegistry::new(),
        }
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.options.primary_key.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Live rows, for inspection
    pub fn data_source(&self) -> &[Value] {
        &self.rows
    }

    /// Live rows, for direct unvalidated mutation
    pub fn data_source_mut(&mut self) -> &mut Vec<Value> {
        &mut self.rows
    }

    /// Consumes the table, returning its rows
    pub fn into_rows(self) -> Vec<Value> {
        self.rows
    }

    // ==================
    // Queries
    // ==================

    /// Rows satisfying `conditions`, in table order
    pub fn filtered_list(&self, conditions: &Condition) -> TableResult<Vec<&Value>> {
        QueryPipeline::filter(&self.rows, Some(conditions)).map_err(TableError::from)
    }

    /// Stable multi-key sort of any row sequence
    pub fn sorted_list<R: Borrow<Value>>(mut rows: Vec<R>, sorts: impl Into<SortKeys>) -> Vec<R> {
        RowSorter::sort(&mut rows, &sorts.into().to_specs());
        rows
    }

    /// Filter, count, sort, paginate and optionally wrap in meta
    pub fn get_rows(&self, request: &QueryRequest) -> TableResult<QueryOutput> {
        match QueryPipeline::execute(&self.rows, request, self.options.post_process.as_deref()) {
            Ok(result) => {
                self.metrics
                    .record_query(result.scanned_count, result.output.len());
                if Logger::enabled(Severity::Trace) {
                    Logger::trace(
                        Event::QueryExecuted.as_str(),
                        &[
                            ("scanned", &result.scanned_count.to_string()),
                            ("total_count", &result.total_count.to_string()),
                            ("current_count", &result.output.len().to_string()),
                        ],
                    );
                }
                Ok(result.output)
            }
            Err(err) => {
                self.metrics.increment_queries_rejected();
                Logger::info(Event::QueryRejected.as_str(), &[("code", err.code())]);
                Err(err.into())
            }
        }
    }

    /// `get_rows` with raw pagination strings and loose sort keys
    pub fn select_rows(
        &self,
        limit: Option<&str>,
        offset: Option<&str>,
        conditions: Option<Condition>,
        sort: Option<SortKeys>,
        meta: bool,
    ) -> TableResult<QueryOutput> {
        let request = QueryRequest {
            pagination: Pagination::parse(limit, offset),
            conditions,
            sorts: sort.map(|keys| keys.to_specs()).unwrap_or_default(),
            want_meta: meta,
        };
        self.get_rows(&request)
    }

    /// First row in table order satisfying `conditions`, if any
    pub fn select_row(&self, conditions: &Condition) -> TableResult<Option<&Value>> {
        Ok(self.find_index(conditions)?.map(|i| &self.rows[i]))
    }

    // ==================
    // Mutations
    // ==================

    /// Appends a row, rejecting duplicate primary key values
    pub fn insert_row(&mut self, item: Value) -> TableResult<&Value> {
        if let Some(key) = self.options.primary_key.as_deref() {
            if let Some(value) = resolve_path(&item, key) {
                let duplicate = self
                    .rows
                    .iter()
                    .filter_map(|row| resolve_path(row, key))
                    .any(|existing| values_equal(existing, value));

                if duplicate {
                    let err = TableError::DuplicateKey {
                        key: key.to_string(),
                        value: value.clone(),
                    };
                    self.reject_mutation(&err);
                    return Err(err);
                }
            }
        }

        self.rows.push(item);
        self.metrics.increment_inserts();
        Logger::info(
            Event::RowInserted.as_str(),
            &[("rows", &self.rows.len().to_string())],
        );

        let index = self.rows.len() - 1;
        Ok(&self.rows[index])
    }

    /// Replaces (or, without `new_item`, removes) the first matching row
    pub fn update_row(
        &mut self,
        conditions: &Condition,
        new_item: Option<Value>,
    ) -> TableResult<bool> {
        let index = match self.find_index(conditions) {
            Ok(Some(index)) => index,
            Ok(None) => {
                let err = TableError::ConditionNotFound;
                self.reject_mutation(&err);
                return Err(err);
            }
            Err(err) => {
                self.reject_mutation(&err);
                return Err(err);
            }
        };

        match new_item {
            Some(item) => {
                self.rows[index] = item;
                self.metrics.increment_updates();
                Logger::info(Event::RowUpdated.as_str(), &[("index", &index.to_string())]);
            }
            None => {
                self.rows.remove(index);
                self.metrics.increment_deletes();
                Logger::info(Event::RowDeleted.as_str(), &[("index", &index.to_string())]);
            }
        }
        Ok(true)
    }

    /// Removes the first matching row
    pub fn delete_row(&mut self, conditions: &Condition) -> TableResult<bool> {
        self.update_row(conditions, None)
    }

    fn find_index(&self, conditions: &Condition) -> TableResult<Option<usize>> {
        for (index, row) in self.rows.iter().enumerate() {
            if ConditionEvaluator::evaluate(row, conditions)? {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    fn reject_mutation(&self, err: &TableError) {
        self.metrics.increment_mutations_rejected();
        Logger::info(Event::MutationRejected.as_str(), &[("code", err.code())]);
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("rows", &self.rows.len())
            .field("options", &self.options)
            .finish()
    }
}
