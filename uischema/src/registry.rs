//! Widget registry.
//!
//! A closed table from symbolic widget name to constructor. Most entries
//! instantiate a single [`Primitive`]; a few are small composites (data
//! table, stats card, action bar) or adapters that add a structural marker
//! before forwarding to a primitive (`Grid.Row`, `Grid.Col`).

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};

use crate::{
    element::{Element, Primitive, children_from_value},
    error::{Result, SchemaError},
};

/// Props handed to a widget constructor.
pub type Props = Map<String, Value>;

/// Widget constructor: `(props, children, key) -> element`.
///
/// Fails only when the widget rejects its props.
pub type Constructor = fn(Props, Vec<Element>, Option<String>) -> Result<Element>;

/// Every name the registry knows.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum Widget {
    // layout
    Grid,
    #[strum(serialize = "Grid.Row")]
    GridRow,
    #[strum(serialize = "Grid.Col")]
    GridCol,
    Box,
    Paper,

    // cards
    Card,
    CardItem,
    CardContent,
    CardHeader,

    // tables
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableCell,

    // data display
    Typography,
    Alert,
    List,
    ListItem,
    ListItemText,
    Divider,
    Avatar,
    Chip,
    LinearProgress,

    // actions
    Button,

    // business widgets
    DataTable,
    StatsCard,
    ActionBar,
}

impl Widget {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether this widget exists to display text, so a schema title on it
    /// would only repeat its content.
    pub fn is_text(self) -> bool {
        self == Widget::Typography
    }
}

/// A registry entry returned by [`Registry::resolve`].
#[derive(Clone, Copy)]
pub struct Resolved {
    pub widget: Widget,
    constructor: Constructor,
}

impl Resolved {
    /// Instantiate the widget.
    pub fn build(&self, props: Props, children: Vec<Element>, key: Option<String>) -> Result<Element> {
        (self.constructor)(props, children, key)
    }
}

impl std::fmt::Debug for Resolved {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved").field("widget", &self.widget).finish()
    }
}

/// Closed mapping from widget name to constructor.
#[derive(Clone)]
pub struct Registry {
    entries: BTreeMap<Widget, Constructor>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl Registry {
    /// The registry with every built-in widget.
    pub fn standard() -> Self {
        let mut reg = Registry {
            entries: BTreeMap::new(),
        };

        reg.insert(Widget::Grid, |p, c, k| Ok(Element::node(Primitive::Grid, p, c, k)));
        reg.insert(Widget::GridRow, |p, c, k| {
            Ok(Element::node(Primitive::Grid, with_marker(p, "container"), c, k))
        });
        reg.insert(Widget::GridCol, |p, c, k| {
            Ok(Element::node(Primitive::Grid, with_marker(p, "item"), c, k))
        });
        reg.insert(Widget::Box, |p, c, k| Ok(Element::node(Primitive::Box, p, c, k)));
        reg.insert(Widget::Paper, |p, c, k| Ok(Element::node(Primitive::Paper, p, c, k)));

        reg.insert(Widget::Card, |p, c, k| Ok(Element::node(Primitive::Card, p, c, k)));
        reg.insert(Widget::CardItem, card_item);
        reg.insert(Widget::CardContent, |p, c, k| {
            Ok(Element::node(Primitive::CardContent, p, c, k))
        });
        reg.insert(Widget::CardHeader, |p, c, k| {
            Ok(Element::node(Primitive::CardHeader, p, c, k))
        });

        reg.insert(Widget::Table, table);
        reg.insert(Widget::TableHead, |p, c, k| Ok(Element::node(Primitive::TableHead, p, c, k)));
        reg.insert(Widget::TableBody, |p, c, k| Ok(Element::node(Primitive::TableBody, p, c, k)));
        reg.insert(Widget::TableRow, |p, c, k| Ok(Element::node(Primitive::TableRow, p, c, k)));
        reg.insert(Widget::TableCell, |p, c, k| Ok(Element::node(Primitive::TableCell, p, c, k)));

        reg.insert(Widget::Typography, |p, c, k| {
            Ok(Element::node(Primitive::Typography, p, c, k))
        });
        reg.insert(Widget::Alert, |p, c, k| Ok(Element::node(Primitive::Alert, p, c, k)));
        reg.insert(Widget::List, |p, c, k| Ok(Element::node(Primitive::List, p, c, k)));
        reg.insert(Widget::ListItem, |p, c, k| Ok(Element::node(Primitive::ListItem, p, c, k)));
        reg.insert(Widget::ListItemText, |p, c, k| {
            Ok(Element::node(Primitive::ListItemText, p, c, k))
        });
        reg.insert(Widget::Divider, |p, c, k| Ok(Element::node(Primitive::Divider, p, c, k)));
        reg.insert(Widget::Avatar, |p, c, k| Ok(Element::node(Primitive::Avatar, p, c, k)));
        reg.insert(Widget::Chip, |p, c, k| Ok(Element::node(Primitive::Chip, p, c, k)));
        reg.insert(Widget::LinearProgress, |p, c, k| {
            Ok(Element::node(Primitive::LinearProgress, p, c, k))
        });

        reg.insert(Widget::Button, |p, c, k| Ok(Element::node(Primitive::Button, p, c, k)));

        reg.insert(Widget::DataTable, data_table);
        reg.insert(Widget::StatsCard, stats_card);
        reg.insert(Widget::ActionBar, action_bar);

        reg
    }

    fn insert(&mut self, widget: Widget, constructor: Constructor) {
        self.entries.insert(widget, constructor);
    }

    /// Look up a widget by its symbolic name.
    pub fn resolve(&self, name: &str) -> Option<Resolved> {
        let widget: Widget = name.parse().ok()?;
        self.entries.get(&widget).map(|&constructor| Resolved {
            widget,
            constructor,
        })
    }

    /// Registered names in table order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().map(|w| w.name())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Set a boolean marker prop unless the caller already set it.
fn with_marker(mut props: Props, marker: &str) -> Props {
    props.entry(marker).or_insert(Value::Bool(true));
    props
}

/// Shallow-merge `overrides` (when it is an object) over `base`.
fn merge_style(base: Value, overrides: Option<&Value>) -> Value {
    let mut merged = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    if let Some(Value::Object(extra)) = overrides {
        for (k, v) in extra {
            merged.insert(k.clone(), v.clone());
        }
    }
    Value::Object(merged)
}

fn single(key: &str, value: Value) -> Props {
    let mut props = Props::new();
    props.insert(key.to_string(), value);
    props
}

fn card_item(props: Props, children: Vec<Element>, key: Option<String>) -> Result<Element> {
    let sx = merge_style(json!({"mb": 2}), props.get("sx"));
    Ok(Element::node(
        Primitive::Card,
        single("sx", sx),
        vec![Element::node(Primitive::CardContent, Props::new(), children, None)],
        key,
    ))
}

fn table(props: Props, children: Vec<Element>, key: Option<String>) -> Result<Element> {
    let mut container = single("component", json!("Paper"));
    container.insert("sx".into(), json!({"mt": 2}));
    Ok(Element::node(
        Primitive::TableContainer,
        container,
        vec![Element::node(Primitive::Table, props, children, None)],
        key,
    ))
}

/// Read an array prop, treating absence as empty.
fn array_prop<'a>(widget: Widget, props: &'a Props, name: &str) -> Result<&'a [Value]> {
    match props.get(name) {
        None => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(SchemaError::InvalidProp {
            widget: widget.name(),
            prop: name.to_string(),
            expected: "array".to_string(),
            actual: other.to_string(),
        }),
    }
}

fn object_entry<'a>(widget: Widget, prop: &str, idx: usize, value: &'a Value) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| SchemaError::InvalidProp {
        widget: widget.name(),
        prop: format!("{prop}[{idx}]"),
        expected: "object".to_string(),
        actual: value.to_string(),
    })
}

fn cell(content: Vec<Element>, idx: usize) -> Element {
    Element::node(Primitive::TableCell, Props::new(), content, Some(idx.to_string()))
}

fn data_table(props: Props, _children: Vec<Element>, key: Option<String>) -> Result<Element> {
    let widget = Widget::DataTable;
    let columns = array_prop(widget, &props, "columns")?;
    let data = array_prop(widget, &props, "data")?;

    let mut head = Vec::with_capacity(columns.len());
    let mut index_keys = Vec::with_capacity(columns.len());
    for (idx, col) in columns.iter().enumerate() {
        let col = object_entry(widget, "columns", idx, col)?;
        let title = col.get("title").unwrap_or(&Value::Null);
        head.push(cell(children_from_value(widget.name(), title)?, idx));
        index_keys.push(match col.get("dataIndex") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        });
    }

    let mut rows = Vec::with_capacity(data.len());
    for (row_idx, row) in data.iter().enumerate() {
        let row = object_entry(widget, "data", row_idx, row)?;
        let mut cells = Vec::with_capacity(index_keys.len());
        for (col_idx, index_key) in index_keys.iter().enumerate() {
            let value = index_key
                .as_ref()
                .and_then(|k| row.get(k))
                .filter(|v| crate::data::document::is_truthy(v));
            let content = match value {
                Some(v) => children_from_value(widget.name(), v)?,
                None => vec![Element::text("-")],
            };
            cells.push(cell(content, col_idx));
        }
        rows.push(Element::node(
            Primitive::TableRow,
            Props::new(),
            cells,
            Some(row_idx.to_string()),
        ));
    }

    let header = Element::node(
        Primitive::TableHead,
        Props::new(),
        vec![Element::node(Primitive::TableRow, Props::new(), head, None)],
        None,
    );
    let body = Element::node(Primitive::TableBody, Props::new(), rows, None);

    Ok(Element::node(
        Primitive::TableContainer,
        single("component", json!("Paper")),
        vec![Element::node(Primitive::Table, Props::new(), vec![header, body], None)],
        key,
    ))
}

fn stats_card(props: Props, _children: Vec<Element>, key: Option<String>) -> Result<Element> {
    let name = Widget::StatsCard.name();
    let field = |prop: &str| -> Result<Vec<Element>> {
        children_from_value(name, props.get(prop).unwrap_or(&Value::Null))
    };
    let color = match props.get("color") {
        None => "primary".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    let mut caption = single("color", json!("textSecondary"));
    caption.insert("gutterBottom".into(), Value::Bool(true));

    let mut headline = single("variant", json!("h4"));
    headline.insert("component".into(), json!("div"));
    headline.insert("color".into(), Value::String(format!("{color}.main")));

    let mut footnote = single("variant", json!("body2"));
    footnote.insert("color".into(), json!("textSecondary"));

    let lines = vec![
        Element::node(Primitive::Typography, caption, field("title")?, None),
        Element::node(Primitive::Typography, headline, field("value")?, None),
        Element::node(Primitive::Typography, footnote, field("subtitle")?, None),
    ];

    Ok(Element::node(
        Primitive::Card,
        Props::new(),
        vec![Element::node(Primitive::CardContent, Props::new(), lines, None)],
        key,
    ))
}

fn action_bar(props: Props, children: Vec<Element>, key: Option<String>) -> Result<Element> {
    let sx = merge_style(json!({"display": "flex", "gap": 1, "mb": 2}), props.get("style"));
    Ok(Element::node(Primitive::Box, single("sx", sx), children, key))
}
