//! Query output types

use serde::Serialize;
use serde_json::Value;

/// Count metadata returned alongside a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryMeta {
    /// Rows matching the conditions, before pagination
    pub total_count: usize,
    /// Rows in the returned page, after post-processing
    pub current_count: usize,
    pub limit: Option<usize>,
    pub offset: usize,
}

/// Output of a `get_rows` call.
///
/// Serializes as a bare array, or as `{"result": [...], "meta": {...}}`
/// when meta was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Rows(Vec<Value>),
    WithMeta { result: Vec<Value>, meta: QueryMeta },
}

impl QueryOutput {
    /// Returns the page rows
    pub fn rows(&self) -> &[Value] {
        match self {
            QueryOutput::Rows(rows) => rows,
            QueryOutput::WithMeta { result, .. } => result,
        }
    }

    /// Consumes the output, returning the page rows
    pub fn into_rows(self) -> Vec<Value> {
        match self {
            QueryOutput::Rows(rows) => rows,
            QueryOutput::WithMeta { result, .. } => result,
        }
    }

    /// Returns the meta envelope, if requested
    pub fn meta(&self) -> Option<&QueryMeta> {
        match self {
            QueryOutput::Rows(_) => None,
            QueryOutput::WithMeta { meta, .. } => Some(meta),
        }
    }

    pub fn len(&self) -> usize {
        self.rows().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}
