//! Rendering shells.
//!
//! The two presentational wrappers sitting between the session and the
//! renderers. The form shell checks the schema shape and hands the form to a
//! [`FormEngine`]; the component shell runs the [`Compiler`] and turns any
//! error it raises into a displayed error state.

use serde::Serialize;
use serde_json::Value;

use crate::{
    compile::Compiler,
    data::{document::is_truthy, is_form_schema},
    element::Element,
    error::Result,
    registry::Registry,
};

/// What a form engine is given to lay out.
#[derive(Debug, Clone, Copy)]
pub struct FormInput<'a> {
    pub schema: &'a Value,
    pub ui_schema: &'a Value,
    pub form_data: &'a Value,
}

/// Notifications a form engine sends back to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// The user changed a field; carries the whole updated form data.
    Change(Value),
    /// The user submitted the form.
    Submit(Value),
}

/// Boundary to the engine that owns form widgets and field validation.
pub trait FormEngine {
    /// Lay out the form for `input`.
    fn layout(&self, input: &FormInput<'_>) -> Result<Element>;

    /// Build a change event assigning `raw` to the field at the dot-separated
    /// `path`.
    fn change(&self, input: &FormInput<'_>, path: &str, raw: &str) -> Result<FormEvent>;

    /// Build a submit event for the current data.
    fn submit(&self, input: &FormInput<'_>) -> FormEvent {
        FormEvent::Submit(input.form_data.clone())
    }
}

/// Panel titles shown above each renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelTitles {
    pub form: String,
    pub component: String,
}

impl Default for PanelTitles {
    fn default() -> Self {
        Self {
            form: "Form preview".to_string(),
            component: "Component preview".to_string(),
        }
    }
}

/// Badge shown next to the form panel title.
pub const FORM_BADGE: &str = "form mode";

pub const FORM_EMPTY_MESSAGE: &str = "Enter a valid JSON Schema in the editor";
pub const FORM_SHAPE_MESSAGE: &str =
    "Invalid form schema. A form schema needs `type: \"object\"` and a `properties` field.";
pub const COMPONENT_EMPTY_MESSAGE: &str = "Enter a valid component schema in the editor";

/// Content of a rendered panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "content", rename_all = "snake_case")]
pub enum PanelBody {
    /// Nothing to show yet.
    Empty(String),
    /// The document cannot be shown by this renderer.
    Warning(String),
    /// Rendering failed.
    Error(String),
    /// Rendered output.
    Tree(Element),
}

/// A titled panel, the unit handed to the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub body: PanelBody,
}

impl Panel {
    /// The rendered tree, if the panel holds one.
    pub fn tree(&self) -> Option<&Element> {
        match &self.body {
            PanelBody::Tree(tree) => Some(tree),
            _ => None,
        }
    }
}

/// Render the form panel.
pub fn form_panel(
    title: &str,
    schema: Option<&Value>,
    ui_schema: &Value,
    form_data: &Value,
    engine: &dyn FormEngine,
) -> Panel {
    let Some(schema) = schema.filter(|s| is_truthy(s)) else {
        return Panel {
            title: title.to_string(),
            badge: None,
            body: PanelBody::Empty(FORM_EMPTY_MESSAGE.to_string()),
        };
    };

    let body = if !is_form_schema(schema) {
        PanelBody::Warning(FORM_SHAPE_MESSAGE.to_string())
    } else {
        let input = FormInput {
            schema,
            ui_schema,
            form_data,
        };
        match engine.layout(&input) {
            Ok(tree) => PanelBody::Tree(tree),
            Err(e) => {
                error!("form rendering failed: {e}");
                PanelBody::Error(format!("Form rendering error: {e}"))
            }
        }
    };

    Panel {
        title: title.to_string(),
        badge: Some(FORM_BADGE.to_string()),
        body,
    }
}

/// Render the component panel.
pub fn component_panel(title: &str, schema: Option<&Value>, registry: &Registry) -> Panel {
    let body = match schema.filter(|s| is_truthy(s)) {
        None => PanelBody::Empty(COMPONENT_EMPTY_MESSAGE.to_string()),
        Some(schema) => match Compiler::new(registry).compile_document(schema) {
            Ok(tree) => PanelBody::Tree(tree),
            Err(e) => {
                error!("component rendering failed: {e}");
                PanelBody::Error(format!("Render error: {e}"))
            }
        },
    };

    Panel {
        title: title.to_string(),
        badge: None,
        body,
    }
}
