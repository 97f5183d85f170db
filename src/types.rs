//! Common types used throughout the exporter
//!
//! Shared type aliases and small utility types used across modules.

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
///
/// With serde_json's `preserve_order` feature this keeps insertion order,
/// which is what makes JSON field order and CSV column order stable.
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A flat record ready for serialization: field name to scalar value
pub type FormattedRecord = JsonObject;

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
