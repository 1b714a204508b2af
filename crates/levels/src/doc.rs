//! Raw document access helpers
//!
//! Levels travel as JSON trees and stay untyped until the decoders pull
//! individual fields out. These helpers wrap the `serde_json::Value`
//! accessors so a missing or mis-shaped field surfaces as a
//! [`LevelError::MissingField`] with enough context to locate it,
//! instead of a silent null.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{LevelError, Result};

/// Read and parse a JSON document from disk.
pub(crate) fn read_document(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Required string field.
pub(crate) fn require_str<'a>(
    doc: &'a Value,
    field: &'static str,
    context: &str,
) -> Result<&'a str> {
    doc.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| LevelError::missing(field, context))
}

/// Required integer field.
pub(crate) fn require_i64(doc: &Value, field: &'static str, context: &str) -> Result<i64> {
    doc.get(field)
        .and_then(Value::as_i64)
        .ok_or_else(|| LevelError::missing(field, context))
}

/// Required boolean field.
pub(crate) fn require_bool(doc: &Value, field: &'static str, context: &str) -> Result<bool> {
    doc.get(field)
        .and_then(Value::as_bool)
        .ok_or_else(|| LevelError::missing(field, context))
}

/// Optional string field; JSON null reads as absent.
pub(crate) fn opt_str<'a>(doc: &'a Value, field: &str) -> Option<&'a str> {
    doc.get(field).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_str() {
        let doc = json!({"name": "Room_A", "count": 3});
        assert_eq!(require_str(&doc, "name", "level").unwrap(), "Room_A");

        let err = require_str(&doc, "count", "level").unwrap_err();
        assert!(matches!(err, LevelError::MissingField { field: "count", .. }));
    }

    #[test]
    fn test_require_i64() {
        let doc = json!({"x": -12});
        assert_eq!(require_i64(&doc, "x", "level").unwrap(), -12);
        assert!(require_i64(&doc, "y", "level").is_err());
    }

    #[test]
    fn test_require_bool() {
        let doc = json!({"externalLevels": true});
        assert!(require_bool(&doc, "externalLevels", "project").unwrap());
        assert!(require_bool(&doc, "simplifiedExport", "project").is_err());
    }

    #[test]
    fn test_opt_str_treats_null_as_absent() {
        let doc = json!({"bgRelPath": null, "iid": "abc"});
        assert_eq!(opt_str(&doc, "bgRelPath"), None);
        assert_eq!(opt_str(&doc, "iid"), Some("abc"));
        assert_eq!(opt_str(&doc, "missing"), None);
    }
}
