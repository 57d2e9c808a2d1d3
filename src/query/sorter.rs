//! Row sorting
//!
//! Sorts rows by an ordered list of `field:direction` keys. The first key
//! is primary and later keys break ties. The sort is stable, so rows equal
//! under every key keep their table order.

use std::borrow::Borrow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::condition::resolve_path;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort specification for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by, possibly a dotted path
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parses a `field:direction` token.
    ///
    /// Anything other than exactly `desc` sorts ascending, including a
    /// missing direction.
    pub fn parse(token: &str) -> Self {
        match token.split_once(':') {
            Some((field, "desc")) => Self::desc(field),
            Some((field, _)) => Self::asc(field),
            None => Self::asc(token),
        }
    }

    /// Renders the spec back into token form
    pub fn token(&self) -> String {
        format!("{}:{}", self.field, self.direction.as_str())
    }
}

/// Sort keys as callers supply them: one token or an ordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortKeys {
    Single(String),
    Many(Vec<String>),
}

impl SortKeys {
    /// Normalizes into parsed specs, preserving order
    pub fn to_specs(&self) -> Vec<SortSpec> {
        match self {
            SortKeys::Single(token) => vec![SortSpec::parse(token)],
            SortKeys::Many(tokens) => tokens.iter().map(|t| SortSpec::parse(t)).collect(),
        }
    }
}

impl From<&str> for SortKeys {
    fn from(token: &str) -> Self {
        SortKeys::Single(token.to_string())
    }
}

impl From<String> for SortKeys {
    fn from(token: String) -> Self {
        SortKeys::Single(token)
    }
}

impl From<Vec<String>> for SortKeys {
    fn from(tokens: Vec<String>) -> Self {
        SortKeys::Many(tokens)
    }
}

impl From<Vec<&str>> for SortKeys {
    fn from(tokens: Vec<&str>) -> Self {
        SortKeys::Many(tokens.into_iter().map(String::from).collect())
    }
}

/// Sorts rows
pub struct RowSorter;

impl RowSorter {
    /// Sorts rows in place by the given specs.
    ///
    /// Sort is stable and deterministic.
    pub fn sort<R: Borrow<Value>>(rows: &mut [R], specs: &[SortSpec]) {
        if specs.is_empty() {
            return;
        }

        rows.sort_by(|a, b| {
            specs
                .iter()
                .map(|spec| {
                    let ordering = Self::compare_values(
                        resolve_path(a.borrow(), &spec.field),
                        resolve_path(b.borrow(), &spec.field),
                    );
                    match spec.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Compares two JSON values for sorting.
    ///
    /// Ordering rules:
    /// - missing < null < bool < number < string < array < object
    /// - Numbers compare numerically, strings lexicographically (no
    ///   case folding)
    /// - Arrays and objects of the same type compare equal
    pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        let (a_val, b_val) = match (a, b) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a_val), Some(b_val)) => (a_val, b_val),
        };

        let type_order = |v: &Value| -> u8 {
            match v {
                Value::Null => 0,
                Value::Bool(_) => 1,
                Value::Number(_) => 2,
                Value::String(_) => 3,
                Value::Array(_) => 4,
                Value::Object(_) => 5,
            }
        };

        let a_type = type_order(a_val);
        let b_type = type_order(b_val);
        if a_type != b_type {
            return a_type.cmp(&b_type);
        }

        match (a_val, b_val) {
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(x), Value::Number(y)) => {
                let x = x.as_f64().unwrap_or(0.0);
                let y = y.as_f64().unwrap_or(0.0);
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            }
            (Value::String(x), Value::String(y)) => x.cmp(y),
            _ => Ordering::Equal,
        }
    }
}
