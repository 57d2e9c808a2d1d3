//! Query pipeline
//!
//! # Execution Flow (strict order)
//!
//! 1. Short-circuit on an empty table or a zero limit
//! 2. Filter the full table by the condition tree
//! 3. Record the total count (before pagination)
//! 4. Sort (if specified)
//! 5. Paginate
//! 6. Without meta: return the page as-is
//! 7. With meta: post-process the page, then wrap it in the envelope
//!
//! Post-processing runs only when meta is requested. Callers that never
//! ask for meta receive untransformed rows; this is part of the contract.

use serde_json::Value;

use super::request::QueryRequest;
use super::result::{QueryMeta, QueryOutput};
use super::sorter::RowSorter;
use crate::condition::{Condition, ConditionEvaluator, ConditionResult};

/// Outcome of a pipeline run with execution counters
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    pub output: QueryOutput,
    /// Rows the filter examined
    pub scanned_count: usize,
    /// Rows that passed the filter
    pub total_count: usize,
}

/// Runs `get_rows` requests over a row slice
pub struct QueryPipeline;

impl QueryPipeline {
    /// Returns the rows satisfying `condition`, in table order.
    ///
    /// A validation failure aborts the scan; no partial result is returned.
    pub fn filter<'a>(
        rows: &'a [Value],
        condition: Option<&Condition>,
    ) -> ConditionResult<Vec<&'a Value>> {
        match condition {
            None => Ok(rows.iter().collect()),
            Some(cond) => {
                let mut matched = Vec::new();
                for row in rows {
                    if ConditionEvaluator::evaluate(row, cond)? {
                        matched.push(row);
                    }
                }
                Ok(matched)
            }
        }
    }

    /// Executes a request
    pub fn execute(
        rows: &[Value],
        request: &QueryRequest,
        post_process: Option<&dyn Fn(Vec<Value>) -> Vec<Value>>,
    ) -> ConditionResult<PipelineResult> {
        let pagination = request.pagination;

        if rows.is_empty() || pagination.is_empty_window() {
            return Ok(PipelineResult {
                output: Self::wrap(Vec::new(), 0, request),
                scanned_count: 0,
                total_count: 0,
            });
        }

        let mut matched = Self::filter(rows, request.conditions.as_ref())?;
        let total_count = matched.len();

        RowSorter::sort(&mut matched, &request.sorts);

        let page: Vec<Value> = pagination.apply(matched).into_iter().cloned().collect();

        let output = if request.want_meta {
            let page = match post_process {
                Some(transform) => transform(page),
                None => page,
            };
            Self::wrap(page, total_count, request)
        } else {
            QueryOutput::Rows(page)
        };

        Ok(PipelineResult {
            output,
            scanned_count: rows.len(),
            total_count,
        })
    }

    fn wrap(page: Vec<Value>, total_count: usize, request: &QueryRequest) -> QueryOutput {
        if !request.want_meta {
            return QueryOutput::Rows(page);
        }

        let meta = QueryMeta {
            total_count,
            current_count: page.len(),
            limit: request.pagination.limit,
            offset: request.pagination.offset,
        };
        QueryOutput::WithMeta { result: page, meta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::ConditionItem;
    use crate::query::SortSpec;
    use serde_json::json;

    fn rows(n: i64) -> Vec<Value> {
        (1..=n)
            .map(|i| json!({"id": i, "parity": if i % 2 == 0 { "even" } else { "odd" }}))
            .collect()
    }

    #[test]
    fn test_filter_without_condition_is_identity() {
        let data = rows(3);
        let matched = QueryPipeline::filter(&data, None).unwrap();
        assert_eq!(matched, data.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_total_count_before_pagination() {
        let data = rows(10);
        let req = QueryRequest::new()
            .conditions(vec![ConditionItem::eq("parity", json!("even"))])
            .limit(2)
            .with_meta();

        let result = QueryPipeline::execute(&data, &req, None).unwrap();
        let meta = result.output.meta().unwrap();
        assert_eq!(meta.total_count, 5);
        assert_eq!(meta.current_count, 2);
        assert_eq!(result.scanned_count, 10);
        assert_eq!(result.output.rows()[0]["id"], 2);
    }

    #[test]
    fn test_sort_then_paginate() {
        let data = rows(10);
        let req = QueryRequest::new().sort("id:desc").offset(1).limit(3);
        let result = QueryPipeline::execute(&data, &req, None).unwrap();

        let ids: Vec<_> = result.output.rows().iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!(9), json!(8), json!(7)]);
        assert_eq!(req.sorts, vec![SortSpec::desc("id")]);
    }

    #[test]
    fn test_short_circuit_on_zero_limit() {
        let data = rows(10);
        let req = QueryRequest::new().limit(0).with_meta();
        let result = QueryPipeline::execute(&data, &req, None).unwrap();

        assert!(result.output.is_empty());
        assert_eq!(result.output.meta().unwrap().total_count, 0);
        assert_eq!(result.scanned_count, 0);
    }

    #[test]
    fn test_post_process_only_with_meta() {
        let data = rows(4);
        let drop_first = |mut page: Vec<Value>| {
            page.remove(0);
            page
        };

        let plain = QueryPipeline::execute(&data, &QueryRequest::new(), Some(&drop_first)).unwrap();
        assert_eq!(plain.output.len(), 4);

        let meta = QueryPipeline::execute(&data, &QueryRequest::new().with_meta(), Some(&drop_first))
            .unwrap();
        assert_eq!(meta.output.len(), 3);
        assert_eq!(meta.output.meta().unwrap().current_count, 3);
        assert_eq!(meta.output.meta().unwrap().total_count, 4);
    }
}
