//! Query request model
//!
//! A request bundles pagination, an optional condition tree, sort keys and
//! the meta flag. It can be built in code or parsed from the JSON shape
//! used by the line protocol:
//!
//! ```json
//! {"limit": 10, "offset": "20", "conditions": [{"name": "a", "like": true}],
//!  "sort": ["status:asc", "id:desc"], "meta": true}
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::paginator::Pagination;
use super::sorter::{SortKeys, SortSpec};
use crate::condition::Condition;
use crate::table::{TableError, TableResult};

/// A parsed `get_rows` request
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryRequest {
    pub pagination: Pagination,
    pub conditions: Option<Condition>,
    pub sorts: Vec<SortSpec>,
    /// Wrap the page in the meta envelope (and run post-processing)
    pub want_meta: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawQuery {
    #[serde(default)]
    limit: Option<Value>,
    #[serde(default)]
    offset: Option<Value>,
    #[serde(default)]
    conditions: Option<Value>,
    #[serde(default, alias = "sorts")]
    sort: Option<SortKeys>,
    #[serde(default, alias = "want_meta")]
    meta: bool,
}

impl QueryRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.pagination.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.pagination.offset = offset;
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn conditions(mut self, conditions: impl Into<Condition>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }

    pub fn sort(mut self, keys: impl Into<SortKeys>) -> Self {
        self.sorts = keys.into().to_specs();
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.want_meta = true;
        self
    }

    /// Parses the JSON request shape.
    ///
    /// `null` and `{}` are both the empty request.
    pub fn from_json(value: &Value) -> TableResult<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }

        let raw: RawQuery = serde_json::from_value(value.clone())
            .map_err(|e| TableError::InvalidRequest(e.to_string()))?;

        let conditions = match raw.conditions {
            None | Some(Value::Null) => None,
            Some(ref v) => Some(Condition::from_json(v)?),
        };

        Ok(Self {
            pagination: Pagination::from_json(raw.limit.as_ref(), raw.offset.as_ref()),
            conditions,
            sorts: raw.sort.map(|k| k.to_specs()).unwrap_or_default(),
            want_meta: raw.meta,
        })
    }
}
