//! Recursive sanitation over JSON-like values.

use serde_json::Value;

use crate::sanitize;

/// Sanitize every string leaf of a JSON value, preserving the shape of
/// arrays and objects. Numbers, booleans and null pass through unchanged.
pub fn deep_sanitize(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(sanitize(text)),
        Value::Array(items) => Value::Array(items.iter().map(deep_sanitize).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), deep_sanitize(item)))
                .collect(),
        ),
        other => other.clone(),
    }
}
