//! Terminal view of panels and element trees.

use std::fmt::{self, Write as _};

use colored::Colorize;
use serde_json::{Map, Value};

use crate::{
    element::{Element, Primitive, WidgetElement},
    shell::{Panel, PanelBody},
};

/// Options for [`render_panel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    /// Print sibling keys after each widget name.
    pub show_keys: bool,
}

/// Render a panel: title line, badge, then the body indented by one level.
pub fn render_panel(panel: &Panel, opts: ViewOptions) -> String {
    let mut out = String::new();
    match write_panel(&mut out, panel, opts) {
        Ok(()) => out,
        Err(e) => {
            debug!("panel cannot be rendered: {e}");
            String::new()
        }
    }
}

fn write_panel(out: &mut String, panel: &Panel, opts: ViewOptions) -> fmt::Result {
    match &panel.badge {
        Some(badge) => writeln!(out, "{} [{}]", panel.title.bold(), badge.cyan())?,
        None => writeln!(out, "{}", panel.title.bold())?,
    }
    match &panel.body {
        PanelBody::Empty(msg) => writeln!(out, "  {}", msg.dimmed()),
        PanelBody::Warning(msg) => writeln!(out, "  {}", msg.yellow()),
        PanelBody::Error(msg) => writeln!(out, "  {}", msg.red()),
        PanelBody::Tree(tree) => write_element(out, tree, 1, opts),
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize, opts: ViewOptions) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match element {
        Element::Text { text } => writeln!(out, "{indent}{text:?}"),
        Element::Placeholder { .. } => {
            writeln!(out, "{indent}{}", "(no component type specified)".dimmed())
        }
        Element::Missing { component, .. } => writeln!(
            out,
            "{indent}{}",
            format!("component not found: {component}").yellow()
        ),
        Element::Widget(w) if w.primitive == Primitive::Field => {
            writeln!(out, "{indent}{}", field_line(w))
        }
        Element::Widget(w) => {
            write!(out, "{indent}{}", w.primitive.to_string().green())?;
            if opts.show_keys
                && let Some(key) = &w.key
            {
                write!(out, " #{key}")?;
            }
            let props = compact_props(&w.props);
            if !props.is_empty() {
                write!(out, " {}", props.dimmed())?;
            }
            writeln!(out)?;
            for child in &w.children {
                write_element(out, child, depth + 1, opts)?;
            }
            Ok(())
        }
    }
}

/// `label*: value [type]`, followed by the validation message if any.
fn field_line(w: &WidgetElement) -> String {
    let text = |name: &str| w.props.get(name).and_then(Value::as_str).unwrap_or_default();
    let required = w.props.get("required").and_then(Value::as_bool) == Some(true);

    let mut line = format!(
        "{}{}: {} [{}]",
        text("label"),
        if required { "*" } else { "" },
        text("value"),
        text("type")
    );
    if let Some(error) = w.props.get("error").and_then(Value::as_str) {
        line.push(' ');
        line.push_str(&error.red().to_string());
    }
    line
}

/// One-line `{k=v ...}` summary of scalar props. Nested values are elided.
fn compact_props(props: &Map<String, Value>) -> String {
    let parts: Vec<String> = props
        .iter()
        .map(|(k, v)| match v {
            Value::String(s) => format!("{k}={s}"),
            Value::Object(_) => format!("{k}={{..}}"),
            Value::Array(_) => format!("{k}=[..]"),
            other => format!("{k}={other}"),
        })
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain() {
        colored::control::set_override(false);
    }

    fn render(element: &Element, opts: ViewOptions) -> String {
        let mut out = String::new();
        write_element(&mut out, element, 0, opts).unwrap();
        out
    }

    #[test]
    fn test_render_tree() {
        plain();
        let tree = Element::node(
            Primitive::Card,
            Map::from_iter([("sx".to_string(), json!({"mb": 2})), ("raised".to_string(), json!(true))]),
            vec![
                Element::typography(Map::new(), "Hello"),
                Element::Missing {
                    key: Some("x".into()),
                    component: "Fancy".into(),
                },
                Element::Placeholder { key: None },
            ],
            Some("card".into()),
        );

        let out = render(&tree, ViewOptions { show_keys: true });
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Card #card {sx={..} raised=true}");
        assert_eq!(lines[1], "  Typography");
        assert_eq!(lines[2], "    \"Hello\"");
        assert_eq!(lines[3], "  component not found: Fancy");
        assert_eq!(lines[4], "  (no component type specified)");

        let out = render(&tree, ViewOptions::default());
        assert!(out.starts_with("Card {"));
    }

    #[test]
    fn test_render_field() {
        plain();
        let field = Element::node(
            Primitive::Field,
            Map::from_iter([
                ("label".to_string(), json!("Name")),
                ("value".to_string(), json!("")),
                ("type".to_string(), json!("string")),
                ("required".to_string(), json!(true)),
                ("error".to_string(), json!("is a required property")),
            ]),
            Vec::new(),
            None,
        );
        assert_eq!(
            render(&field, ViewOptions::default()),
            "Name*:  [string] is a required property\n"
        );
    }

    #[test]
    fn test_render_panel_states() {
        plain();
        let panel = Panel {
            title: "Form preview".into(),
            badge: Some("form mode".into()),
            body: PanelBody::Warning("bad shape".into()),
        };
        assert_eq!(
            render_panel(&panel, ViewOptions::default()),
            "Form preview [form mode]\n  bad shape\n"
        );

        let panel = Panel {
            title: "Component preview".into(),
            badge: None,
            body: PanelBody::Tree(Element::text("hi")),
        };
        assert_eq!(
            render_panel(&panel, ViewOptions::default()),
            "Component preview\n  \"hi\"\n"
        );
    }
}
