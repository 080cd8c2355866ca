//! Error types shared by the schema compiler, the form shells and the editor.

use thiserror::Error;

/// Errors raised while turning schema documents into something renderable.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema text is not a valid JSON document.
    ///
    /// Carries the parser's own message unmodified.
    #[error("{0}")]
    Parse(String),

    /// A resolved widget rejected one of its props.
    #[error("{widget}: prop `{prop}` expected {expected}, got {actual}")]
    InvalidProp {
        widget: &'static str,
        prop: String,
        expected: String,
        actual: String,
    },

    /// A value that cannot be rendered was passed as children.
    #[error("{widget}: objects are not valid as children (found {actual})")]
    InvalidChildren {
        widget: &'static str,
        actual: String,
    },

    /// A form field value does not match the field's declared type.
    #[error("Type mismatch at {path}: expected {expected}, got {actual}")]
    TypeMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// A form field path does not exist in the schema.
    #[error("No field at {0}")]
    UnknownField(String),

    /// The form engine failed to lay out the form.
    #[error("form engine failed: {0}")]
    FormEngine(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Parse(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SchemaError>;
