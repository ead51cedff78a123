//! Dot-notation access into JSON object trees.
//!
//! Standard events are nested `serde_json` objects. Mapping entries address a
//! destination with a dotted path such as `process.parent.pid`; these helpers
//! walk or build that path.

use serde_json::{Map, Value};

/// Write `value` at `path` inside `root`, creating intermediate objects.
///
/// Any non-object value found at an intermediate segment is replaced by an
/// empty object. Empty path segments are ignored, so `a..b` behaves like
/// `a.b`. Returns `false` when the path has no usable segment.
pub fn set_at_path(root: &mut Map<String, Value>, path: &str, value: Value) -> bool {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        return false;
    };

    let mut current = root;
    for segment in parents {
        let slot = current
            .entry((*segment).to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(map) = slot else {
            return false;
        };
        current = map;
    }
    current.insert((*last).to_string(), value);
    true
}

/// Read the value at `path`, if every segment resolves through objects.
pub fn get_at_path<'a>(root: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.').filter(|s| !s.is_empty());
    let mut current = root.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Render a scalar JSON value as plain text. Strings are returned unquoted;
/// arrays and objects are JSON-encoded.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
