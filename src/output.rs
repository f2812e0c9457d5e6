//! JSON text rendering for query engine values.
//!
//! Object keys come out in insertion order, matching the decoded document.
//! Compact output via [`to_json`], human-readable 2-space-indented output
//! via [`to_json_pretty`].

use crate::decoder::tree_to_json;
use crate::value::Value;

/// Converts a Value to a compact JSON string.
///
/// # Examples
///
/// ```
/// use dotquery::Value;
/// use dotquery::output::to_json;
///
/// assert_eq!(to_json(&Value::Number(42.0)), "42");
/// assert_eq!(to_json(&Value::String("a".into())), "\"a\"");
/// ```
pub fn to_json(value: &Value) -> String {
    serde_json::to_string(&tree_to_json(value.clone())).unwrap_or_else(|_| "null".to_string())
}

/// Converts a Value to a pretty-printed JSON string with 2-space indentation.
pub fn to_json_pretty(value: &Value) -> String {
    serde_json::to_string_pretty(&tree_to_json(value.clone()))
        .unwrap_or_else(|_| "null".to_string())
}
