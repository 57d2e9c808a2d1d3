//! Offset/limit pagination
//!
//! Policy:
//! - absent or unparsable offset is 0
//! - absent or unparsable limit means "no limit"
//! - a limit of 0 yields an empty page
//! - an offset past the end yields an empty page, never an error
//!
//! Raw values parse the way a lenient integer parser does: surrounding
//! whitespace is ignored and trailing garbage after the leading digits is
//! dropped (`"10px"` is 10). Negative values count as unparsable.

use serde::Serialize;
use serde_json::Value;

/// Resolved pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Pagination {
    /// Maximum rows to return; `None` returns everything from `offset`
    pub limit: Option<usize>,
    /// Rows to skip
    pub offset: usize,
}

impl Pagination {
    pub fn new(limit: Option<usize>, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// Parses raw limit/offset strings
    pub fn parse(limit: Option<&str>, offset: Option<&str>) -> Self {
        Self {
            limit: limit.and_then(parse_int),
            offset: offset.and_then(parse_int).unwrap_or(0),
        }
    }

    /// Parses limit/offset from JSON numbers or numeric strings
    pub fn from_json(limit: Option<&Value>, offset: Option<&Value>) -> Self {
        Self {
            limit: limit.and_then(json_int),
            offset: offset.and_then(json_int).unwrap_or(0),
        }
    }

    /// True if the limit guarantees an empty page
    pub fn is_empty_window(&self) -> bool {
        self.limit == Some(0)
    }

    /// Returns the rows in `[offset, offset + limit)`
    pub fn apply<T>(&self, rows: Vec<T>) -> Vec<T> {
        let skipped = rows.into_iter().skip(self.offset);
        match self.limit {
            Some(limit) => skipped.take(limit).collect(),
            None => skipped.collect(),
        }
    }
}

/// Parses the leading non-negative integer of a string
fn parse_int(raw: &str) -> Option<usize> {
    let trimmed = raw.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

fn json_int(value: &Value) -> Option<usize> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
            .and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}
