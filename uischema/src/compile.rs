//! Component tree compiler.
//!
//! Walks a component schema depth-first and instantiates each node through the
//! [`Registry`]. Missing or unknown component names become visible nodes in
//! the output instead of errors, so one bad node never hides the rest of the
//! tree. The only error that escapes is a widget rejecting its props.

use serde_json::{Map, Value, json};

use crate::{
    data::ComponentNode,
    element::{Element, Primitive, children_from_value},
    error::Result,
    registry::Registry,
};

/// Compiles component schemas against a registry.
#[derive(Clone, Copy)]
pub struct Compiler<'r> {
    registry: &'r Registry,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Compile a raw schema document.
    pub fn compile_document(&self, doc: &Value) -> Result<Element> {
        self.compile(&ComponentNode::from(doc), None)
    }

    /// Compile `node`, using `key` as its identity among siblings.
    pub fn compile(&self, node: &ComponentNode, key: Option<&str>) -> Result<Element> {
        let key = key.map(String::from);

        let Some(name) = node.component.as_deref() else {
            return Ok(Element::Placeholder { key });
        };

        let Some(component) = self.registry.resolve(name) else {
            warn!("component not found: {name}");
            return Ok(Element::Missing {
                key,
                component: name.to_string(),
            });
        };

        let mut props = node.component_props.clone();
        let prop_children = props.remove("children");

        let mut children = match &node.properties {
            Some(properties) => properties
                .iter()
                .map(|(child_key, child)| self.compile(child, Some(child_key)))
                .collect::<Result<Vec<_>>>()?,
            None => match &prop_children {
                Some(value) => children_from_value(component.widget.name(), value)?,
                None => Vec::new(),
            },
        };

        if let Some(title) = &node.title
            && !component.widget.is_text()
        {
            children.insert(0, heading(title));
        }

        let element = component.build(props, children, key)?;

        let Some(decorator_name) = node.decorator.as_deref() else {
            return Ok(element);
        };
        match self.registry.resolve(decorator_name) {
            Some(decorator) => decorator.build(node.decorator_props.clone(), vec![element], None),
            None => {
                debug!("decorator not found, rendering undecorated: {decorator_name}");
                Ok(element)
            }
        }
    }
}

/// Heading injected in front of a titled component's children.
fn heading(title: &str) -> Element {
    let mut props = Map::new();
    props.insert("variant".into(), json!("h6"));
    props.insert("gutterBottom".into(), Value::Bool(true));
    Element::node(Primitive::Typography, props, vec![Element::text(title)], None)
}
