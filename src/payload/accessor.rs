use serde_json::Value;

/// Runtime kind of a JSON node, used to type-check the leaf of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    List,
    Map,
}

pub fn kind_of(value: &Value) -> Kind {
    match value {
        Value::Null => Kind::Null,
        Value::Bool(_) => Kind::Bool,
        Value::Number(_) => Kind::Number,
        Value::String(_) => Kind::String,
        Value::Array(_) => Kind::List,
        Value::Object(_) => Kind::Map,
    }
}

/// Walks a key path through nested objects.
///
/// Returns `None` when any intermediate node is not an object, a key is
/// missing, or the leaf does not match `expected`. Never panics.
pub fn get_nested<'a>(payload: &'a Value, path: &[&str], expected: Option<Kind>) -> Option<&'a Value> {
    let mut current = payload;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    match expected {
        Some(kind) if kind_of(current) != kind => None,
        _ => Some(current),
    }
}

/// Reads a string field from `activity.actor.<key>`.
pub fn actor_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    get_nested(payload, &["activity", "actor", key], Some(Kind::String)).and_then(Value::as_str)
}

/// Reads a string field from `activity.<key>`.
pub fn activity_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    get_nested(payload, &["activity", key], Some(Kind::String)).and_then(Value::as_str)
}

/// Reads a string field from `data.<key>`.
pub fn data_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    get_nested(payload, &["data", key], Some(Kind::String)).and_then(Value::as_str)
}
