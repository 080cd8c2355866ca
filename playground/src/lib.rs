//! # schema-playground
//!
//! Terminal front end for previewing form and component schemas.
//!
//! The playground loads a schema document (from the built-in catalog or from
//! a file), decides whether it describes a form or a component tree, and
//! renders the matching panel as an indented tree or as JSON.
//!
//! ## Modules
//!
//! - [`config`] - `.playground.toml` settings
//! - [`ctx`] - Application context and state management
//! - [`menuconfig`] - Editing the settings through their own form schema
//! - [`utils`] - Input reading and `path=value` parsing

/// Playground settings.
pub mod config;

/// Application context and state management.
pub mod ctx;

/// Config-as-form editing.
pub mod menuconfig;

/// Common utilities and helper functions.
pub mod utils;

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub use uischema;
