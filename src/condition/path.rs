//! Dotted field path resolution

use serde_json::Value;

/// Resolves a field path on a row.
///
/// A literal key wins over path traversal, so `{"a.b": 1}` resolves `a.b`
/// to `1`. Otherwise each dot-separated segment descends into an object
/// key or an array index. Returns `None` if any segment is missing.
pub fn resolve_path<'a>(row: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(v) = row.get(path) {
        return Some(v);
    }
    if !path.contains('.') {
        return None;
    }

    let mut current = row;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
