//! Designer-defined custom fields
//!
//! Levels and entities carry free-form fields authored in the design
//! tool (`fieldInstances` in the document). The subtree is lifted out
//! of the raw document during assembly and kept behind a shared
//! handle, so an entity's fields stay readable after the document and
//! even the level itself are gone.

use std::sync::Arc;

use serde_json::Value;

use crate::doc::opt_str;
use crate::error::{LevelError, Result};

/// A scalar custom-field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Integer field
    Int(i64),

    /// Boolean field
    Bool(bool),

    /// Float field
    Float(f64),

    /// String, enum, color, or path field
    Str(String),
}

impl FieldValue {
    /// Convert a raw `__value` into a scalar.
    ///
    /// JSON null means the field was left unset. Arrays and objects
    /// (point, tile, and multi-value fields) have no scalar form and
    /// are rejected.
    fn from_value(name: &str, value: &Value) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(FieldValue::Bool(*b))),
            Value::String(s) => Ok(Some(FieldValue::Str(s.clone()))),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Ok(Some(FieldValue::Int(int)))
                } else if let Some(float) = number.as_f64() {
                    Ok(Some(FieldValue::Float(float)))
                } else {
                    Err(LevelError::UnsupportedField(name.to_string()))
                }
            }
            Value::Array(_) | Value::Object(_) => {
                Err(LevelError::UnsupportedField(name.to_string()))
            }
        }
    }
}

/// A shared handle on a `fieldInstances` subtree.
///
/// Cloning is cheap (a refcount bump); the subtree is dropped when the
/// last holder goes away.
#[derive(Debug, Clone)]
pub struct CustomFields {
    doc: Arc<Value>,
}

impl Default for CustomFields {
    fn default() -> Self {
        Self::empty()
    }
}

impl CustomFields {
    /// Wrap a subtree taken out of a raw document
    pub(crate) fn new(doc: Value) -> Self {
        Self { doc: Arc::new(doc) }
    }

    /// A field list with no entries
    pub fn empty() -> Self {
        Self::new(Value::Array(Vec::new()))
    }

    /// Look up a field by identifier.
    ///
    /// Returns `Ok(None)` when no entry matches or the matching entry
    /// was left unset. Entries without an identifier of their own are
    /// skipped, so one malformed entry cannot hide the rest of the
    /// list. The first matching entry wins; a duplicated identifier
    /// reads the same no matter what later duplicates hold.
    pub fn get(&self, name: &str) -> Result<Option<FieldValue>> {
        let Some(entries) = self.doc.as_array() else {
            return Ok(None);
        };
        for entry in entries {
            match opt_str(entry, "__identifier") {
                Some(identifier) if identifier == name => {
                    return match entry.get("__value") {
                        Some(value) => FieldValue::from_value(name, value),
                        // No __value at all reads the same as an unset one.
                        None => Ok(None),
                    };
                }
                _ => continue,
            }
        }
        Ok(None)
    }
}
