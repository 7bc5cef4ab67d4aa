//! Convert serde_json::Value to text parameters. The statement casts each
//! placeholder (`$n::bigint`, `$n::double precision`), so the server does the
//! type conversion and rejects values that do not fit the column.

use serde_json::Value;

/// Text form of a JSON value for binding. `None` binds SQL NULL.
pub fn text_param(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(v.to_string()),
    }
}
