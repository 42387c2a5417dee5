use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::retry::ShouldRetryData;

pub fn never_retry() -> ShouldRetryData {
    Arc::new(|_: &JsonValue| false)
}

/// Retry while the top-level string `field` equals `value`,
/// e.g. `field_equals("status", "pending")`.
pub fn field_equals(field: impl Into<String>, value: impl Into<String>) -> ShouldRetryData {
    let field = field.into();
    let value = value.into();
    Arc::new(move |payload: &JsonValue| {
        payload.get(&field).and_then(JsonValue::as_str) == Some(value.as_str())
    })
}
