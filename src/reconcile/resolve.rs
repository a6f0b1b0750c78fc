use super::Row;
use serde_json::Value;

/// Treats anything that is not a JSON object as an absent container.
pub fn as_row(value: Option<&Value>) -> Option<&Row> {
    value.and_then(Value::as_object)
}

/// Final value of `key`: an entry present in `changes` wins (explicit null
/// included), then an entry present in `fallback`, else null.
///
/// Presence is by key ownership, so `false` and `0` are honored as values.
pub fn resolve_field(changes: Option<&Row>, fallback: Option<&Row>, key: &str) -> Value {
    if let Some(v) = changes.and_then(|c| c.get(key)) {
        return v.clone();
    }
    if let Some(v) = fallback.and_then(|f| f.get(key)) {
        return v.clone();
    }
    Value::Null
}
