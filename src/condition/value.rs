//! JSON value helpers shared by the validator, evaluator and sorter

use serde_json::{Number, Value};

/// Returns the type name of a JSON value for error messages
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// True for values a predicate treats as "not supplied": absent, null or ""
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Parses a numeric string the way a lenient float parser would accept it
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// String form of a row value used by case-insensitive matching.
///
/// Missing and null values render as the empty string.
pub fn display_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_string(n),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| display_string(Some(v)))
            .collect::<Vec<_>>()
            .join(","),
        Some(other @ Value::Object(_)) => other.to_string(),
    }
}

/// Canonical string form of a number: integral floats drop their `.0`
fn number_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f)
            if n.is_f64()
                && f.fract() == 0.0
                && f >= i64::MIN as f64
                && f < i64::MAX as f64 =>
        {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}

/// Structural equality with numeric comparison of numbers at every depth.
///
/// `serde_json` distinguishes `5` from `5.0`; rows built by hand or parsed
/// from different sources must still compare equal.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(xf), Some(yf)) => xf == yf,
            _ => x == y,
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, xv)| ym.get(k).is_some_and(|yv| values_equal(xv, yv)))
        }
        _ => a == b,
    }
}
