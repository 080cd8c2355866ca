//! Schema documents and the data derived from them.
//!
//! This module covers everything that reads a schema document without
//! rendering it:
//!
//! - [`document`] - text to document parsing and pretty-printing
//! - [`component`] - component-schema nodes
//! - [`form`] - form-schema checks and default form data
//! - [`item`] - form fields as laid out for editing

/// Text to document boundary.
pub mod document;

/// Component-schema node model.
pub mod component;

/// Form-schema helpers and default-data synthesis.
pub mod form;

/// Form field model with typed value coercion.
pub mod item;

pub use component::ComponentNode;
pub use document::{format_document, parse_document};
pub use form::{is_form_schema, synthesize_defaults};
