//! Helper functions for safe JSON parsing
//!
//! These functions provide safe access to JSON values with proper error handling,
//! avoiding unwrap() and providing clear error messages.

use crate::error::{RendererError, RendererResult};
use serde_json::Value;

/// Safely get a string value from JSON object
pub fn get_str<'a>(obj: &'a Value, key: &str) -> RendererResult<&'a str> {
    obj.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RendererError::Decode(
            format!("Expected string for '{}', got: {:?}", key, obj.get(key))
        ))
}

/// Safely get an optional array value
pub fn get_array_opt<'a>(obj: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key).and_then(|v| v.as_array())
}

/// Unwrap the device's `{"key": {"value": ...}}` wrapper
pub fn get_wrapped<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).and_then(|v| v.get("value"))
}

/// Safely get an optional wrapped string value
pub fn get_wrapped_str<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    get_wrapped(obj, key).and_then(|v| v.as_str())
}

/// Safely get a wrapped integer value with default
pub fn get_wrapped_i64_or(obj: &Value, key: &str, default: i64) -> i64 {
    get_wrapped(obj, key)
        .and_then(|v| v.as_i64())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrapped_values() {
        let value = json!({"template": {"value": "Grid"}, "vertical_scroll": {"value": 42}, "flat": 3});
        assert_eq!(get_wrapped_str(&value, "template"), Some("Grid"));
        assert_eq!(get_wrapped_i64_or(&value, "vertical_scroll", 0), 42);
        assert_eq!(get_wrapped_i64_or(&value, "missing", 7), 7);
        assert_eq!(get_wrapped(&value, "flat"), None);
    }

    #[test]
    fn test_get_str_reports_decode_error() {
        let value = json!({"id": 5});
        assert!(matches!(get_str(&value, "id"), Err(RendererError::Decode(_))));
        assert!(get_array_opt(&value, "id").is_none());
    }
}
