//! Query Pipeline Tests
//!
//! Tests for the get_rows execution order:
//! - Filter, count, sort, paginate, then wrap
//! - Pagination windows at and past the table edge
//! - Meta counts reflect the filtered set and the returned page
//! - Multi-key sorting is stable
//! - Post-processing applies only to meta responses

use mocktable::condition::{Condition, ConditionItem};
use mocktable::{Pagination, QueryOutput, QueryRequest, SortKeys, Table, TableOptions};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn users(n: i64) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("User{}", i),
                "status": if i % 3 == 0 { "active" } else { "pending" }
            })
        })
        .collect()
}

fn ids(rows: &[Value]) -> Vec<i64> {
    rows.iter().filter_map(|r| r["id"].as_i64()).collect()
}

fn tag_rows(rows: Vec<Value>) -> Vec<Value> {
    rows.into_iter()
        .map(|mut row| {
            row["tagged"] = json!(true);
            row
        })
        .collect()
}

// =============================================================================
// Pagination Tests
// =============================================================================

/// A window straddling the end returns only the rows that exist.
#[test]
fn test_window_at_table_end() {
    let table = Table::new(users(100));
    let rows = table
        .get_rows(&QueryRequest::new().limit(10).offset(95))
        .unwrap()
        .into_rows();
    assert_eq!(ids(&rows), vec![96, 97, 98, 99, 100]);
}

/// Limit zero returns nothing and reports zero totals.
#[test]
fn test_zero_limit_is_empty() {
    let table = Table::new(users(10));
    let output = table
        .get_rows(&QueryRequest::new().limit(0).with_meta())
        .unwrap();

    assert!(output.is_empty());
    let meta = output.meta().unwrap();
    assert_eq!(meta.total_count, 0);
    assert_eq!(meta.limit, Some(0));
}

/// An offset past the end yields an empty page but a full total.
#[test]
fn test_offset_past_end() {
    let table = Table::new(users(10));
    let output = table
        .get_rows(&QueryRequest::new().offset(50).with_meta())
        .unwrap();

    assert!(output.rows().is_empty());
    assert_eq!(output.meta().unwrap().total_count, 10);
    assert_eq!(output.meta().unwrap().current_count, 0);
}

/// Raw strings: garbage limit means unlimited, garbage offset means zero.
#[test]
fn test_select_rows_parses_raw_pagination() {
    let table = Table::new(users(10));

    let rows = table
        .select_rows(Some("abc"), Some("-3"), None, None, false)
        .unwrap();
    assert_eq!(rows.len(), 10);

    let rows = table
        .select_rows(Some(" 3"), Some("4px"), None, None, false)
        .unwrap();
    assert_eq!(ids(rows.rows()), vec![5, 6, 7]);

    assert_eq!(Pagination::parse(Some("-1"), None), Pagination::new(None, 0));
}

// =============================================================================
// Meta Envelope Tests
// =============================================================================

/// totalCount counts the filtered set; currentCount counts the page.
#[test]
fn test_meta_counts() {
    let table = Table::new(users(30));
    let request = QueryRequest::new()
        .conditions(ConditionItem::eq("status", json!("active")))
        .limit(4)
        .offset(2)
        .with_meta();

    let output = table.get_rows(&request).unwrap();
    let meta = output.meta().unwrap();
    assert_eq!(meta.total_count, 10);
    assert_eq!(meta.current_count, 4);
    assert_eq!(meta.offset, 2);
    assert_eq!(ids(output.rows()), vec![9, 12, 15, 18]);
}

/// The envelope serializes with camelCase meta keys.
#[test]
fn test_meta_envelope_shape() {
    let table = Table::new(users(3));
    let output = table
        .get_rows(&QueryRequest::new().limit(1).with_meta())
        .unwrap();

    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["result"][0]["id"], 1);
    assert_eq!(value["meta"]["totalCount"], 3);
    assert_eq!(value["meta"]["currentCount"], 1);

    let plain = table.get_rows(&QueryRequest::new().limit(1)).unwrap();
    assert!(serde_json::to_value(&plain).unwrap().is_array());
}

// =============================================================================
// Post-Processing Tests
// =============================================================================

/// The transform sees only the page, and only when meta is requested.
#[test]
fn test_post_process_only_with_meta() {
    let table = Table::with_options(users(5), TableOptions::new().post_process(tag_rows));

    let plain = table.get_rows(&QueryRequest::new().limit(2)).unwrap();
    assert!(plain.rows().iter().all(|r| r.get("tagged").is_none()));

    let wrapped = table
        .get_rows(&QueryRequest::new().limit(2).with_meta())
        .unwrap();
    match wrapped {
        QueryOutput::WithMeta { result, meta } => {
            assert_eq!(result.len(), 2);
            assert!(result.iter().all(|r| r["tagged"] == true));
            assert_eq!(meta.total_count, 5);
        }
        QueryOutput::Rows(_) => panic!("expected meta envelope"),
    }

    // Stored rows are untouched
    assert!(table.data_source()[0].get("tagged").is_none());
}

/// An empty table short-circuits: zero counts and no transform.
#[test]
fn test_short_circuit_empty_table_skips_post_process() {
    let table = Table::with_options(Vec::new(), TableOptions::new().post_process(|_| {
        vec![json!({"injected": true})]
    }));

    let output = table.get_rows(&QueryRequest::new().with_meta()).unwrap();
    assert!(output.rows().is_empty());
    let meta = output.meta().unwrap();
    assert_eq!(meta.total_count, 0);
    assert_eq!(meta.current_count, 0);
}

/// Limit zero short-circuits the same way on a populated table.
#[test]
fn test_short_circuit_zero_limit_skips_post_process() {
    let table = Table::with_options(users(5), TableOptions::new().post_process(|_| {
        vec![json!({"injected": true})]
    }));

    let output = table
        .get_rows(&QueryRequest::new().limit(0).with_meta())
        .unwrap();
    assert!(output.rows().is_empty());
    let meta = output.meta().unwrap();
    assert_eq!(meta.total_count, 0);
    assert_eq!(meta.current_count, 0);
    assert_eq!(meta.limit, Some(0));
}

// =============================================================================
// Sorting Tests
// =============================================================================

/// Primary key ascending, secondary key descending.
#[test]
fn test_multi_key_sort() {
    let table = Table::new(users(6));
    let rows = table
        .get_rows(&QueryRequest::new().sort(vec!["status:asc", "id:desc"]))
        .unwrap()
        .into_rows();
    assert_eq!(ids(&rows), vec![6, 3, 5, 4, 2, 1]);
}

/// Equal keys keep table order.
#[test]
fn test_sort_is_stable() {
    let table = Table::new(vec![
        json!({"id": 1, "group": "b"}),
        json!({"id": 2, "group": "a"}),
        json!({"id": 3, "group": "b"}),
        json!({"id": 4, "group": "a"}),
    ]);

    let rows = table
        .get_rows(&QueryRequest::new().sort("group"))
        .unwrap()
        .into_rows();
    assert_eq!(ids(&rows), vec![2, 4, 1, 3]);
}

/// Sorting happens before pagination.
#[test]
fn test_sort_then_paginate() {
    let table = Table::new(users(20));
    let rows = table
        .get_rows(&QueryRequest::new().sort("id:desc").limit(3))
        .unwrap()
        .into_rows();
    assert_eq!(ids(&rows), vec![20, 19, 18]);
}

/// A single token and a one-element list sort the same way.
#[test]
fn test_select_rows_sort_forms() {
    let table = Table::new(users(5));

    let single = table
        .select_rows(None, None, None, Some(SortKeys::from("id:desc")), false)
        .unwrap();
    let many = table
        .select_rows(None, None, None, Some(SortKeys::from(vec!["id:desc"])), false)
        .unwrap();

    assert_eq!(single, many);
    assert_eq!(ids(single.rows()), vec![5, 4, 3, 2, 1]);
}

/// `sorted_list` works on filtered references.
#[test]
fn test_sorted_list_over_filtered_rows() {
    let table = Table::new(users(9));
    let active = table
        .filtered_list(&Condition::from(ConditionItem::eq("status", json!("active"))))
        .unwrap();

    let sorted = Table::sorted_list(active, "id:desc");
    let sorted: Vec<i64> = sorted.iter().filter_map(|r| r["id"].as_i64()).collect();
    assert_eq!(sorted, vec![9, 6, 3]);
}

// =============================================================================
// JSON Request Tests
// =============================================================================

/// The JSON request form drives the same pipeline.
#[test]
fn test_json_request() {
    let table = Table::new(users(12));
    let request = QueryRequest::from_json(&json!({
        "limit": "2",
        "offset": 1,
        "conditions": [{"status": "ACTIVE"}],
        "sort": ["id:desc"],
        "meta": true
    }))
    .unwrap();

    let output = table.get_rows(&request).unwrap();
    assert_eq!(ids(output.rows()), vec![9, 6]);
    assert_eq!(output.meta().unwrap().total_count, 4);
}

/// Unknown request keys are rejected.
#[test]
fn test_json_request_rejects_unknown_keys() {
    let err = QueryRequest::from_json(&json!({"limt": 3})).unwrap_err();
    assert_eq!(err.code(), "TABLE_INVALID_REQUEST");
}
