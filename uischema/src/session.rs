//! Session state and dispatch.
//!
//! [`Session`] owns the active document, its discriminant, the UI hints, the
//! form data, and the selected catalog entry. Every user action (example
//! selection, schema edit, form event) is applied synchronously through one
//! `&mut self` method, so no intermediate state is ever observable.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    catalog::{self, Example},
    classify::{SchemaKind, classify},
    data::{parse_document, synthesize_defaults},
    error::Result,
    registry::Registry,
    shell::{FormEngine, FormEvent, Panel, PanelTitles, component_panel, form_panel},
};

/// Process-local playground state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    schema: Option<Value>,
    kind: SchemaKind,
    ui_schema: Value,
    form_data: Value,
    selected: Option<String>,
    #[serde(skip)]
    last_submit: Option<Value>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            schema: None,
            kind: SchemaKind::Form,
            ui_schema: Value::Object(Map::new()),
            form_data: Value::Object(Map::new()),
            selected: None,
            last_submit: None,
        }
    }
}

impl Session {
    /// Start a session with the first catalog entry loaded.
    pub fn new() -> Self {
        match catalog::examples().first() {
            Some(first) => Self::with_example(first),
            None => Self::default(),
        }
    }

    /// Start a session with `example` loaded.
    pub fn with_example(example: &Example) -> Self {
        let mut session = Self::default();
        session.select_example(example);
        session
    }

    /// Load a catalog entry, trusting its declared kind.
    ///
    /// Form data comes from the example's seed data, or is synthesized from
    /// its schema when it has none.
    pub fn select_example(&mut self, example: &Example) {
        *self = Session {
            schema: Some(example.schema.clone()),
            kind: example.kind,
            ui_schema: example
                .ui_schema
                .clone()
                .unwrap_or_else(|| Value::Object(Map::new())),
            form_data: example
                .form_data
                .clone()
                .unwrap_or_else(|| synthesize_defaults(&example.schema)),
            selected: Some(example.id.to_string()),
            last_submit: None,
        };
        info!("loaded example: {} ({})", example.title, example.kind);
    }

    /// Apply an edited document.
    ///
    /// The document is classified by shape. A form shape re-seeds the form
    /// data from the new schema; an ambiguous document keeps the current
    /// kind. The selection is cleared because the document no longer matches
    /// a catalog entry. Returns the classification, if any.
    pub fn apply_schema(&mut self, schema: Value) -> Option<SchemaKind> {
        let detected = classify(&schema);
        match detected {
            Some(SchemaKind::Component) => {
                self.kind = SchemaKind::Component;
            }
            Some(SchemaKind::Form) => {
                self.kind = SchemaKind::Form;
                self.form_data = synthesize_defaults(&schema);
            }
            None => debug!("ambiguous schema, keeping {} mode", self.kind),
        }
        self.schema = Some(schema);
        self.selected = None;
        detected
    }

    /// Parse and apply edited schema text.
    ///
    /// On a parse error the session is left untouched.
    pub fn edit_text(&mut self, text: &str) -> Result<Option<SchemaKind>> {
        let schema = parse_document(text)?;
        Ok(self.apply_schema(schema))
    }

    /// Apply a notification from the form engine.
    pub fn handle_form_event(&mut self, event: FormEvent) {
        match event {
            FormEvent::Change(data) => self.form_data = data,
            FormEvent::Submit(data) => {
                info!("form submitted: {data}");
                self.last_submit = Some(data);
            }
        }
    }

    /// Render the panel for the current kind.
    pub fn render(&self, registry: &Registry, engine: &dyn FormEngine, titles: &PanelTitles) -> Panel {
        match self.kind {
            SchemaKind::Form => form_panel(
                &titles.form,
                self.schema.as_ref(),
                &self.ui_schema,
                &self.form_data,
                engine,
            ),
            SchemaKind::Component => {
                component_panel(&titles.component, self.schema.as_ref(), registry)
            }
        }
    }

    pub fn schema(&self) -> Option<&Value> {
        self.schema.as_ref()
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    pub fn ui_schema(&self) -> &Value {
        &self.ui_schema
    }

    pub fn form_data(&self) -> &Value {
        &self.form_data
    }

    /// Id of the selected catalog entry, if the document still is one.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Data from the most recent submit.
    pub fn last_submit(&self) -> Option<&Value> {
        self.last_submit.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{element::Element, engine::PreviewEngine, error::SchemaError, shell::PanelBody};
    use serde_json::json;

    #[test]
    fn test_starts_with_first_example() {
        let session = Session::new();
        let first = &catalog::examples()[0];
        assert_eq!(session.schema(), Some(&first.schema));
        assert_eq!(session.kind(), first.kind);
        assert_eq!(session.selected(), Some(first.id));
    }

    #[test]
    fn test_select_example_sets_all_fields() {
        let mut session = Session::new();
        for example in catalog::examples() {
            session.select_example(example);
            assert_eq!(session.schema(), Some(&example.schema));
            assert_eq!(session.kind(), example.kind);
            assert_eq!(session.selected(), Some(example.id));
            match &example.form_data {
                Some(seed) => assert_eq!(session.form_data(), seed),
                None => assert_eq!(session.form_data(), &synthesize_defaults(&example.schema)),
            }
        }
    }

    #[test]
    fn test_form_edit_resets_data() {
        let mut session = Session::new();
        let kind = session
            .edit_text(r#"{"type":"object","properties":{"x":{"type":"string"}}}"#)
            .unwrap();
        assert_eq!(kind, Some(SchemaKind::Form));
        assert_eq!(session.kind(), SchemaKind::Form);
        assert_eq!(session.form_data(), &json!({"x": ""}));
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_component_edit() {
        let mut session = Session::new();
        let before = session.form_data().clone();
        session.apply_schema(json!({"x-component": "Box"}));
        assert_eq!(session.kind(), SchemaKind::Component);
        assert_eq!(session.form_data(), &before, "component edits keep form data");
    }

    #[test]
    fn test_ambiguous_edit_keeps_kind() {
        let mut session = Session::default();
        session.apply_schema(json!({"x-component": "Box"}));
        assert_eq!(session.apply_schema(json!({"type": "object"})), None);
        assert_eq!(session.kind(), SchemaKind::Component);
        assert_eq!(session.schema(), Some(&json!({"type": "object"})));

        let mut session = Session::default();
        session.apply_schema(json!({"type": "object", "properties": {}}));
        session.apply_schema(json!({}));
        assert_eq!(session.kind(), SchemaKind::Form);
    }

    #[test]
    fn test_parse_error_leaves_state() {
        let mut session = Session::new();
        let before = session.clone();
        let err = session.edit_text("{ not json").unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
        assert_eq!(session, before);
    }

    #[test]
    fn test_deep_component_text_renders() {
        let depth = 100;
        let mut text = String::new();
        for i in 0..depth {
            text.push_str(&format!(r#"{{"x-component": "Box", "properties": {{"n{i}": "#));
        }
        text.push_str(r#"{"x-component": "Chip"}"#);
        text.push_str(&"}}".repeat(depth));

        let mut session = Session::default();
        assert_eq!(session.edit_text(&text).unwrap(), Some(SchemaKind::Component));

        let panel = session.render(&Registry::standard(), &PreviewEngine, &PanelTitles::default());
        let tree = panel.tree().expect("deep document renders");
        assert_eq!(tree.walk().count(), depth + 1);
        assert_eq!(tree.walk().last().and_then(Element::primitive), Some(crate::element::Primitive::Chip));
    }

    #[test]
    fn test_form_events() {
        let mut session = Session::new();
        session.handle_form_event(FormEvent::Change(json!({"name": "Ann"})));
        assert_eq!(session.form_data(), &json!({"name": "Ann"}));
        assert_eq!(session.last_submit(), None);

        session.handle_form_event(FormEvent::Submit(json!({"name": "Ann"})));
        assert_eq!(session.last_submit(), Some(&json!({"name": "Ann"})));
    }

    #[test]
    fn test_render_routes_by_kind() {
        let registry = Registry::standard();
        let titles = PanelTitles::default();
        let mut session = Session::new();

        let panel = session.render(&registry, &PreviewEngine, &titles);
        assert_eq!(panel.title, titles.form);
        assert!(matches!(panel.body, PanelBody::Tree(_)));

        session.select_example(catalog::find("data-table").unwrap());
        let panel = session.render(&registry, &PreviewEngine, &titles);
        assert_eq!(panel.title, titles.component);
        assert!(panel.tree().unwrap().text_content().contains("Add user"));

        // Ambiguous edit in component mode stays with the component shell.
        session.apply_schema(json!({"type": "object"}));
        let panel = session.render(&registry, &PreviewEngine, &titles);
        assert_eq!(panel.title, titles.component);
        assert!(matches!(panel.body, PanelBody::Tree(Element::Placeholder { .. })));
    }
}
