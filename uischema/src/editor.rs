//! Schema editor state.
//!
//! Holds the text being edited together with its validity. It is kept apart
//! from the [`Session`](crate::session::Session): the editor may hold broken
//! text while the session keeps rendering the last valid document.

use serde_json::{Value, json};

use crate::data::{document::is_truthy, format_document, parse_document};

/// Message used when the text parses to something that is not a schema.
const NOT_A_SCHEMA: &str = "invalid JSON";

/// Text and validity of the schema editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaEditor {
    text: String,
    error: Option<String>,
}

impl SchemaEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor pre-filled with the formatted `schema`.
    pub fn with_schema(schema: &Value) -> Self {
        let mut editor = Self::new();
        editor.sync(Some(schema));
        editor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// The current diagnostic, if the text is invalid.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Show `schema` after it changed outside the editor (e.g. an example was
    /// selected). An empty schema leaves the text alone.
    pub fn sync(&mut self, schema: Option<&Value>) {
        if let Some(schema) = schema.filter(|s| is_truthy(s)) {
            self.text = format_document(schema);
            self.error = None;
        }
    }

    /// Replace the text.
    ///
    /// Returns the parsed document when the text is a valid schema; the
    /// caller dispatches it to the session. Otherwise records the diagnostic
    /// and returns `None`.
    pub fn set_text(&mut self, text: impl Into<String>) -> Option<Value> {
        self.text = text.into();
        match parse_document(&self.text) {
            Ok(doc) if is_truthy(&doc) => {
                self.error = None;
                Some(doc)
            }
            Ok(_) => {
                self.error = Some(NOT_A_SCHEMA.to_string());
                None
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// Pretty-print the text in place. Does nothing while the text is invalid.
    pub fn format(&mut self) -> bool {
        match parse_document(&self.text) {
            Ok(doc) if is_truthy(&doc) => {
                self.text = format_document(&doc);
                true
            }
            _ => false,
        }
    }

    /// Replace the text with the starter form schema and return it.
    pub fn reset(&mut self) -> Value {
        let schema = starter_schema();
        self.text = format_document(&schema);
        self.error = None;
        schema
    }
}

/// Minimal name/email form used by [`SchemaEditor::reset`].
pub fn starter_schema() -> Value {
    json!({
        "type": "object",
        "title": "Sample form",
        "properties": {
            "name": {"type": "string", "title": "Name"},
            "email": {"type": "string", "title": "Email", "format": "email"}
        },
        "required": ["name", "email"]
    })
}
