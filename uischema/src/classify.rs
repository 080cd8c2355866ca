//! Schema-type classification.
//!
//! Decides whether a document is a form schema or a component schema so that
//! the session can route it to the right shell.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{
    component::{COMPONENT_KEY, SCHEMA_OBJECT_KEY},
    document::truthy_field,
    form::is_form_schema,
};

/// Which renderer handles a document.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaKind {
    /// Data-entry form rendered by the form engine.
    #[default]
    Form,
    /// Static widget tree built by the compiler.
    Component,
}

/// Classify a document by its shape.
///
/// Component markers win over the form shape. Returns `None` when the
/// document is neither, in which case callers keep their current kind.
pub fn classify(doc: &Value) -> Option<SchemaKind> {
    if !doc.is_object() {
        return None;
    }
    if truthy_field(doc, COMPONENT_KEY).is_some() || truthy_field(doc, SCHEMA_OBJECT_KEY).is_some() {
        Some(SchemaKind::Component)
    } else if is_form_schema(doc) {
        Some(SchemaKind::Form)
    } else {
        None
    }
}
