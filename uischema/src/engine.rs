//! Preview form engine.
//!
//! Lays out a form schema as a static tree of labeled fields with their
//! current values and live validation messages, and builds change events
//! from `path = value` assignments.

use serde_json::{Map, Value, json};

use crate::{
    data::item::{Field, FieldKind},
    element::{Element, Primitive},
    error::{Result, SchemaError},
    shell::{FormEngine, FormEvent, FormInput},
};

/// Built-in [`FormEngine`] used by the playground front end.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewEngine;

impl FormEngine for PreviewEngine {
    fn layout(&self, input: &FormInput<'_>) -> Result<Element> {
        match input.form_data {
            Value::Object(_) | Value::Null => {}
            other => {
                return Err(SchemaError::FormEngine(format!(
                    "form data must be an object, got {other}"
                )));
            }
        }

        let mut form = Element::node(Primitive::Box, Map::new(), Vec::new(), Some("form".into()));
        if let Some(title) = input.schema.get("title").and_then(Value::as_str) {
            form = form.with_child(Element::typography(props(json!({"variant": "h5"})), title));
        }
        if let Some(desc) = input.schema.get("description").and_then(Value::as_str) {
            form = form.with_child(Element::typography(props(json!({"variant": "body2"})), desc));
        }

        for field in Field::fields_of(input.schema) {
            let value = input.form_data.get(&field.key);
            let hints = input.ui_schema.get(&field.key);
            form = form.with_child(layout_field(&field, &field.key, value, hints));
        }

        Ok(form.with_child(Element::node(
            Primitive::Submit,
            Map::new(),
            vec![Element::text("Submit")],
            None,
        )))
    }

    fn change(&self, input: &FormInput<'_>, path: &str, raw: &str) -> Result<FormEvent> {
        let segments: Vec<&str> = path.split('.').collect();
        let fields = Field::fields_of(input.schema);
        let field = Field::find(&fields, &segments)
            .ok_or_else(|| SchemaError::UnknownField(path.to_string()))?;
        let value = field.kind.coerce(raw, path)?;

        let mut data = match input.form_data {
            Value::Object(_) => input.form_data.clone(),
            _ => Value::Object(Map::new()),
        };
        set_path(&mut data, &segments, value);
        debug!("form field changed: {path}");
        Ok(FormEvent::Change(data))
    }
}

fn props(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Assign `value` at `segments`, creating intermediate objects.
fn set_path(data: &mut Value, segments: &[&str], value: Value) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };
    let mut cursor = data;
    for segment in parents {
        let Value::Object(map) = cursor else {
            return;
        };
        let next = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !next.is_object() {
            *next = Value::Object(Map::new());
        }
        cursor = next;
    }
    if let Value::Object(map) = cursor {
        map.insert(last.to_string(), value);
    }
}

/// Validation message for a field value, if it fails a check.
fn validate(field: &Field, value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => field.required.then(|| "is a required property".to_string()),
        Some(Value::String(s)) if s.is_empty() && field.required => {
            Some("is a required property".to_string())
        }
        Some(v) if !field.kind.accepts(v) => Some(format!("should be {}", field.kind.type_name())),
        Some(_) => None,
    }
}

fn display_value(field: &Field, value: Option<&Value>) -> String {
    match (value, &field.kind) {
        (None | Some(Value::Null), _) => String::new(),
        (Some(v), FieldKind::Enum(item)) => item
            .label_of(v)
            .map(String::from)
            .unwrap_or_else(|| v.to_string()),
        (Some(Value::String(s)), _) => s.clone(),
        (Some(v), _) => v.to_string(),
    }
}

fn hint<'a>(hints: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    hints.and_then(|h| h.get(name))
}

fn layout_field(field: &Field, path: &str, value: Option<&Value>, hints: Option<&Value>) -> Element {
    match &field.kind {
        FieldKind::Object(children) => {
            let mut group = Element::node(
                Primitive::Paper,
                Map::new(),
                vec![Element::typography(props(json!({"variant": "h6"})), &field.title)],
                Some(path.to_string()),
            );
            if let Some(desc) = hint(hints, "ui:description")
                .and_then(Value::as_str)
                .or(field.description.as_deref())
            {
                group = group.with_child(Element::typography(props(json!({"variant": "body2"})), desc));
            }
            for child in children {
                let child_path = format!("{path}.{}", child.key);
                group = group.with_child(layout_field(
                    child,
                    &child_path,
                    value.and_then(|v| v.get(&child.key)),
                    hint(hints, &child.key),
                ));
            }
            group
        }
        FieldKind::Array(array) => {
            let items = value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[]);
            let mut list = Element::node(
                Primitive::List,
                props(json!({"label": field.title, "name": path})),
                Vec::new(),
                Some(path.to_string()),
            );
            for (idx, item) in items.iter().enumerate() {
                let item_path = format!("{path}.{idx}");
                let content = match &array.items {
                    Some(item_field) if matches!(item_field.kind, FieldKind::Object(_)) => {
                        layout_field(item_field, &item_path, Some(item), hint(hints, "items"))
                    }
                    _ => Element::text(match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    }),
                };
                list = list.with_child(Element::node(
                    Primitive::ListItem,
                    Map::new(),
                    vec![content],
                    Some(idx.to_string()),
                ));
            }
            list
        }
        _ => {
            let mut field_props = props(json!({
                "name": path,
                "label": field.title,
                "type": field.kind.type_name(),
                "required": field.required,
                "value": display_value(field, value),
            }));
            if let FieldKind::String { format: Some(format) } = &field.kind {
                field_props.insert("format".into(), json!(format));
            }
            if let FieldKind::Enum(item) = &field.kind {
                field_props.insert("options".into(), json!(item.labels));
            }
            for name in ["ui:widget", "ui:help"] {
                if let Some(v) = hint(hints, name) {
                    field_props.insert(name.trim_start_matches("ui:").into(), v.clone());
                }
            }
            if let Some(message) = validate(field, value) {
                field_props.insert("error".into(), json!(message));
            }
            Element::node(Primitive::Field, field_props, Vec::new(), Some(path.to_string()))
        }
    }
}
