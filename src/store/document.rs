//! # Document Type
//!
//! Schemaless field-to-value records. The only distinguished field is
//! `_key`, the unique identifier of a document within its collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The field holding a document's unique key within its collection.
pub const KEY_FIELD: &str = "_key";

/// A schemaless document: a mapping from field name to JSON value.
///
/// No nested-document or type constraints are enforced. The `_key` field is
/// a string identifier, either externally supplied or generated at insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    fields: Map<String, Value>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Returns the document key, if present as a string field.
    pub fn key(&self) -> Option<&str> {
        self.fields.get(KEY_FIELD).and_then(Value::as_str)
    }

    /// Returns the key, assigning a generated one if absent.
    ///
    /// Keys default to UUID v4, matching stores that auto-key documents
    /// inserted without an explicit `_key`.
    pub fn key_or_assign(&mut self) -> String {
        if let Some(key) = self.key() {
            return key.to_string();
        }
        let key = Uuid::new_v4().to_string();
        self.fields
            .insert(KEY_FIELD.to_string(), Value::String(key.clone()));
        key
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Merge another document's fields into this one.
    ///
    /// Existing fields are overwritten, unrelated fields survive. This is
    /// the partial-update semantic of both execution paths.
    pub fn merge(&mut self, patch: &Document) {
        for (name, value) in &patch.fields {
            self.fields.insert(name.clone(), value.clone());
        }
    }

    /// Convert into a plain JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_key_lookup() {
        let d = doc(json!({"_key": "dhbw", "name": "DHBW"}));
        assert_eq!(d.key(), Some("dhbw"));
    }

    #[test]
    fn test_key_assigned_when_absent() {
        let mut d = doc(json!({"name": "DHBW"}));
        assert_eq!(d.key(), None);
        let key = d.key_or_assign();
        assert!(!key.is_empty());
        assert_eq!(d.key(), Some(key.as_str()));
        // Stable on repeat
        assert_eq!(d.key_or_assign(), key);
    }

    #[test]
    fn test_merge_overwrites_and_preserves() {
        let mut d = doc(json!({"_key": "dhbw", "name": "DHBW", "location": "Stuttgart"}));
        d.merge(&doc(json!({"location": "Heilbronn"})));
        assert_eq!(d.get("location"), Some(&json!("Heilbronn")));
        assert_eq!(d.get("name"), Some(&json!("DHBW")));
    }

    #[test]
    fn test_transparent_serialization() {
        let d = doc(json!({"_key": "dhbw"}));
        assert_eq!(serde_json::to_value(&d).unwrap(), json!({"_key": "dhbw"}));
    }
}
