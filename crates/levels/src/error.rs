//! Error types for the levels crate

use ldtk_mesh::GridError;
use thiserror::Error;

/// Level loading error types
#[derive(Debug, Error)]
pub enum LevelError {
    /// File I/O error
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    /// Document is not valid JSON
    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Level, file, or identifier not found
    #[error("Level not found: {0}")]
    NotFound(String),

    /// A required field is absent or has the wrong shape
    #[error("Missing field '{field}' in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    /// Color string is not of the form #RRGGBB
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Level defines neither its own nor the world background color
    #[error("No background color for level: {0}")]
    MissingBackgroundColor(String),

    /// worldLayout value is not one of the known layouts
    #[error("Unknown world layout: {0}")]
    UnknownLayout(String),

    /// Layer entry carries no type tag
    #[error("Layer {index} has no type tag")]
    MissingLayerKind { index: usize },

    /// Custom field holds an array or object value
    #[error("Unsupported value type for field: {0}")]
    UnsupportedField(String),

    /// Integer-grid payload does not match its declared dimensions
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

impl LevelError {
    /// Shorthand for a missing-field error with context
    pub(crate) fn missing(field: &'static str, context: impl Into<String>) -> Self {
        LevelError::MissingField {
            field,
            context: context.into(),
        }
    }
}

/// Result type for level operations
pub type Result<T> = std::result::Result<T, LevelError>;
