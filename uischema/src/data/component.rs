//! Component-schema nodes.
//!
//! A component schema describes a static widget tree:
//!
//! ```json
//! {
//!   "type": "void",
//!   "x-component": "CardItem",
//!   "x-component-props": { "sx": { "mb": 1 } },
//!   "x-decorator": "Paper",
//!   "title": "Users",
//!   "properties": {
//!     "add": { "x-component": "Button", "x-component-props": { "children": "Add" } }
//!   }
//! }
//! ```
//!
//! Nodes are read leniently: a field with the wrong shape is treated as
//! absent, so that any document the editor accepts can still be compiled.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::document::{is_truthy, truthy_field};

/// Field carrying the symbolic component name.
pub const COMPONENT_KEY: &str = "x-component";
/// Field carrying the props passed to the component.
pub const COMPONENT_PROPS_KEY: &str = "x-component-props";
/// Field carrying the symbolic decorator name.
pub const DECORATOR_KEY: &str = "x-decorator";
/// Field carrying the props passed to the decorator.
pub const DECORATOR_PROPS_KEY: &str = "x-decorator-props";
/// Marker flag set by schema-object producers.
pub const SCHEMA_OBJECT_KEY: &str = "_isJSONSchemaObject";

/// One node of a component schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentNode {
    /// Semantic tag such as `"void"`. Opaque to the compiler.
    pub node_type: Option<String>,
    /// Dialect version. Opaque to the compiler.
    pub version: Option<String>,
    /// Registry name of the component, if any.
    pub component: Option<String>,
    /// Props passed through verbatim to the component.
    pub component_props: Map<String, Value>,
    /// Registry name of the wrapping decorator, if any.
    pub decorator: Option<String>,
    /// Props passed through verbatim to the decorator.
    pub decorator_props: Map<String, Value>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Child nodes in document order. `None` means the node is a leaf.
    pub properties: Option<IndexMap<String, ComponentNode>>,
    /// Whether the document carried the schema-object marker flag.
    pub schema_object: bool,
}

fn text(value: &Value, key: &str) -> Option<String> {
    match truthy_field(value, key)? {
        Value::String(s) => Some(s.clone()),
        // A non-string name still names something, so keep it for diagnostics.
        other => Some(other.to_string()),
    }
}

fn props(value: &Value, key: &str) -> Map<String, Value> {
    match value.get(key) {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}

impl From<&Value> for ComponentNode {
    fn from(value: &Value) -> Self {
        let properties = match value.get("properties") {
            Some(Value::Object(children)) => Some(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), ComponentNode::from(child)))
                    .collect(),
            ),
            _ => None,
        };

        ComponentNode {
            node_type: value.get("type").and_then(Value::as_str).map(String::from),
            version: value.get("version").and_then(Value::as_str).map(String::from),
            component: text(value, COMPONENT_KEY),
            component_props: props(value, COMPONENT_PROPS_KEY),
            decorator: text(value, DECORATOR_KEY),
            decorator_props: props(value, DECORATOR_PROPS_KEY),
            title: text(value, "title"),
            description: text(value, "description"),
            properties,
            schema_object: value.get(SCHEMA_OBJECT_KEY).is_some_and(is_truthy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_full_node() {
        let node = ComponentNode::from(&json!({
            "_isJSONSchemaObject": true,
            "version": "2.0",
            "type": "void",
            "x-component": "CardItem",
            "x-component-props": {"sx": {"mb": 1}},
            "x-decorator": "Paper",
            "x-decorator-props": {"elevation": 2},
            "title": "Users",
            "properties": {
                "b": {"x-component": "Button"},
                "a": {"x-component": "Chip"}
            }
        }));

        assert!(node.schema_object);
        assert_eq!(node.version.as_deref(), Some("2.0"));
        assert_eq!(node.node_type.as_deref(), Some("void"));
        assert_eq!(node.component.as_deref(), Some("CardItem"));
        assert_eq!(node.component_props["sx"], json!({"mb": 1}));
        assert_eq!(node.decorator.as_deref(), Some("Paper"));
        assert_eq!(node.decorator_props["elevation"], json!(2));
        assert_eq!(node.title.as_deref(), Some("Users"));

        let keys: Vec<_> = node.properties.as_ref().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"], "children keep document order");
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let node = ComponentNode::from(&json!({"x-component": "", "title": ""}));
        assert_eq!(node.component, None);
        assert_eq!(node.title, None);
        assert!(node.properties.is_none());
    }

    #[test]
    fn test_wrong_shapes_are_ignored() {
        let node = ComponentNode::from(&json!({
            "x-component": 42,
            "x-component-props": "not a map",
            "properties": [1, 2]
        }));
        assert_eq!(node.component.as_deref(), Some("42"));
        assert!(node.component_props.is_empty());
        assert!(node.properties.is_none());

        let scalar = ComponentNode::from(&json!("Box"));
        assert_eq!(scalar, ComponentNode::default());
    }

    #[test]
    fn test_empty_properties_are_kept() {
        let node = ComponentNode::from(&json!({"x-component": "Box", "properties": {}}));
        assert!(node.properties.as_ref().is_some_and(IndexMap::is_empty));
    }
}
