//! # uischema
//!
//! Turns JSON schema documents into renderable UI trees.
//!
//! A document is either a *form schema* (a JSON Schema object describing data
//! to collect) or a *component schema* (a tree of nodes naming widgets through
//! `x-component`). This crate tells the two apart, compiles component schemas
//! into an [`Element`] tree through a closed widget [`Registry`], hands form
//! schemas to a pluggable [`FormEngine`], and keeps the playground session
//! state that ties an editor, an example catalog, and both renderers together.
//!
//! ## Quick Start
//!
//! ```rust
//! use uischema::{Registry, Session, PanelTitles, engine::PreviewEngine};
//!
//! let mut session = Session::new();
//! session
//!     .edit_text(r#"{"x-component": "Card", "x-component-props": {"title": "Hi"}}"#)
//!     .unwrap();
//!
//! let panel = session.render(&Registry::standard(), &PreviewEngine, &PanelTitles::default());
//! assert!(panel.tree().is_some());
//! ```
//!
//! ## Modules
//!
//! - [`data`] - Document text handling, component nodes, form defaults
//! - [`registry`] - Widget names and their constructors
//! - [`compile`] - Component tree compiler
//! - [`classify`] - Form/component discrimination
//! - [`shell`] - Form and component panels
//! - [`session`] - Playground state and dispatch
//! - [`view`] - Terminal rendering

#![recursion_limit = "256"]

#[macro_use]
extern crate log;

/// Built-in example documents.
pub mod catalog;
pub mod classify;
pub mod compile;
/// Document text handling and schema data structures.
pub mod data;
pub mod editor;
pub mod element;
pub mod engine;
pub mod error;
pub mod registry;
pub mod session;
pub mod shell;
pub mod view;

pub use classify::{SchemaKind, classify};
pub use compile::Compiler;
pub use element::{Element, Primitive};
pub use error::{Result, SchemaError};
pub use registry::{Registry, Widget};
pub use serde_json::Value;
pub use session::Session;
pub use shell::{FormEngine, FormEvent, Panel, PanelBody, PanelTitles};
