//! Renderable element tree produced by the compiler and the form engine.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, SchemaError};

/// Primitive building blocks every widget expands into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::IntoStaticStr,
)]
pub enum Primitive {
    Grid,
    Box,
    Paper,
    Card,
    CardContent,
    CardHeader,
    TableContainer,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell,
    Typography,
    Alert,
    List,
    ListItem,
    ListItemText,
    Divider,
    Avatar,
    Chip,
    LinearProgress,
    Button,
    /// Input control laid out by the form engine.
    Field,
    /// Submit control laid out by the form engine.
    Submit,
}

/// A node of the rendered tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Element {
    /// An instantiated primitive.
    Widget(WidgetElement),
    /// Plain text content.
    Text { text: String },
    /// A schema node that names no component.
    Placeholder {
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },
    /// A schema node naming a component the registry does not know.
    Missing {
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
        component: String,
    },
}

/// An instantiated primitive with its props and children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetElement {
    pub primitive: Primitive,
    /// Stable identity among siblings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    /// Instantiate a primitive.
    pub fn node(
        primitive: Primitive,
        props: Map<String, Value>,
        children: Vec<Element>,
        key: Option<String>,
    ) -> Self {
        Element::Widget(WidgetElement {
            primitive,
            key,
            props,
            children,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Element::Text { text: text.into() }
    }

    /// `Typography` holding a single line of text.
    pub fn typography(props: Map<String, Value>, text: impl Into<String>) -> Self {
        Element::node(Primitive::Typography, props, vec![Element::text(text)], None)
    }

    /// Builder: append a child to a widget element. No-op on other nodes.
    pub fn with_child(mut self, child: Element) -> Self {
        if let Element::Widget(w) = &mut self {
            w.children.push(child);
        }
        self
    }

    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Element::Widget(w) => Some(w.primitive),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Element::Widget(WidgetElement { key, .. })
            | Element::Placeholder { key }
            | Element::Missing { key, .. } => key.as_deref(),
            Element::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[Element] {
        match self {
            Element::Widget(w) => &w.children,
            _ => &[],
        }
    }

    pub fn props(&self) -> Option<&Map<String, Value>> {
        match self {
            Element::Widget(w) => Some(&w.props),
            _ => None,
        }
    }

    /// Depth-first pre-order iterator over this subtree.
    pub fn walk(&self) -> impl Iterator<Item = &Element> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children().iter().rev());
            Some(next)
        })
    }

    /// Names of every unresolved component in this subtree, in tree order.
    pub fn missing_components(&self) -> Vec<&str> {
        self.walk()
            .filter_map(|e| match e {
                Element::Missing { component, .. } => Some(component.as_str()),
                _ => None,
            })
            .collect()
    }

    /// All text content of this subtree concatenated in tree order.
    pub fn text_content(&self) -> String {
        self.walk()
            .filter_map(|e| match e {
                Element::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Convert a `children` value supplied through props into child elements.
///
/// Strings and numbers become text, arrays are flattened, `null` and booleans
/// render nothing. Objects cannot be rendered as children.
pub fn children_from_value(widget: &'static str, value: &Value) -> Result<Vec<Element>> {
    let mut out = Vec::new();
    push_children(widget, value, &mut out)?;
    Ok(out)
}

fn push_children(widget: &'static str, value: &Value, out: &mut Vec<Element>) -> Result<()> {
    match value {
        Value::Null | Value::Bool(_) => {}
        Value::String(s) => out.push(Element::text(s.clone())),
        Value::Number(n) => out.push(Element::text(n.to_string())),
        Value::Array(items) => {
            for item in items {
                push_children(widget, item, out)?;
            }
        }
        Value::Object(_) => {
            return Err(SchemaError::InvalidChildren {
                widget,
                actual: value.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_children_from_value() {
        let children = children_from_value("Box", &json!(["a", 1, null, true, ["b"]])).unwrap();
        assert_eq!(
            children,
            vec![Element::text("a"), Element::text("1"), Element::text("b")]
        );
        assert!(children_from_value("Box", &json!(null)).unwrap().is_empty());
    }

    #[test]
    fn test_object_children_rejected() {
        let err = children_from_value("Button", &json!({"label": "x"})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidChildren { widget: "Button", .. }));
        assert!(err.to_string().contains("Button"));
    }

    #[test]
    fn test_walk_is_preorder() {
        let card = Element::node(Primitive::Card, Map::new(), vec![Element::text("a")], None);
        let tree = Element::node(Primitive::Box, Map::new(), vec![card], None)
            .with_child(Element::text("b"));
        assert_eq!(tree.text_content(), "ab");
        let kinds: Vec<_> = tree.walk().map(Element::primitive).collect();
        assert_eq!(
            kinds,
            vec![Some(Primitive::Box), Some(Primitive::Card), None, None]
        );
    }

    #[test]
    fn test_serialize_shape() {
        let tree = Element::node(
            Primitive::Button,
            Map::from_iter([("variant".to_string(), json!("contained"))]),
            vec![Element::text("Add")],
            Some("add".into()),
        );
        assert_eq!(
            serde_json::to_value(&tree).unwrap(),
            json!({
                "node": "widget",
                "primitive": "Button",
                "key": "add",
                "props": {"variant": "contained"},
                "children": [{"node": "text", "text": "Add"}]
            })
        );
    }
}
