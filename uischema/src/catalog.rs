//! Built-in example catalog.
//!
//! A fixed, ordered list of documents that seed the session. Entries are
//! built once on first access and never change afterwards.

use std::sync::OnceLock;

use serde::Serialize;
use serde_json::{Value, json};

use crate::classify::SchemaKind;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
    /// Unique identifier.
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Renderer that handles `schema`.
    pub kind: SchemaKind,
    pub schema: Value,
    /// Rendering hints for the form engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ui_schema: Option<Value>,
    /// Seed form data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_data: Option<Value>,
}

static CATALOG: OnceLock<Vec<Example>> = OnceLock::new();

/// All built-in examples in display order.
pub fn examples() -> &'static [Example] {
    CATALOG.get_or_init(build)
}

/// Find an example by id.
pub fn find(id: &str) -> Option<&'static Example> {
    examples().iter().find(|e| e.id == id)
}

fn build() -> Vec<Example> {
    vec![
        basic_form(),
        nested_form(),
        conditional_form(),
        dashboard_layout(),
        data_table(),
        content_layout(),
    ]
}

fn basic_form() -> Example {
    Example {
        id: "basic-form",
        title: "Basic form",
        description: "Common form controls in one place",
        kind: SchemaKind::Form,
        schema: json!({
            "type": "object",
            "title": "Sign-up form",
            "properties": {
                "name": {"type": "string", "title": "Name", "minLength": 2, "maxLength": 20},
                "email": {"type": "string", "title": "Email", "format": "email"},
                "age": {"type": "integer", "title": "Age", "minimum": 18, "maximum": 100},
                "gender": {
                    "type": "string",
                    "title": "Gender",
                    "enum": ["male", "female", "other"],
                    "enumNames": ["Male", "Female", "Other"]
                },
                "newsletter": {"type": "boolean", "title": "Subscribe to newsletter", "default": false}
            },
            "required": ["name", "email", "age"]
        }),
        ui_schema: Some(json!({
            "email": {"ui:help": "Enter a valid email address"},
            "age": {"ui:widget": "updown"},
            "gender": {"ui:widget": "radio"}
        })),
        form_data: Some(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "age": 25,
            "gender": "female",
            "newsletter": true
        })),
    }
}

fn nested_form() -> Example {
    Example {
        id: "nested-form",
        title: "Nested form",
        description: "Nested objects and arrays",
        kind: SchemaKind::Form,
        schema: json!({
            "type": "object",
            "title": "Employee record",
            "properties": {
                "personalInfo": {
                    "type": "object",
                    "title": "Personal information",
                    "properties": {
                        "firstName": {"type": "string", "title": "First name"},
                        "lastName": {"type": "string", "title": "Last name"},
                        "birthday": {"type": "string", "title": "Birthday", "format": "date"}
                    },
                    "required": ["firstName", "lastName"]
                },
                "address": {
                    "type": "object",
                    "title": "Address",
                    "properties": {
                        "street": {"type": "string", "title": "Street"},
                        "city": {"type": "string", "title": "City"},
                        "zipCode": {"type": "string", "title": "Zip code", "pattern": "^\\d{6}$"}
                    }
                },
                "skills": {
                    "type": "array",
                    "title": "Skills",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": {"type": "string", "title": "Skill"},
                            "level": {
                                "type": "string",
                                "title": "Level",
                                "enum": ["beginner", "intermediate", "advanced"],
                                "enumNames": ["Beginner", "Intermediate", "Advanced"]
                            }
                        },
                        "required": ["name", "level"]
                    }
                }
            },
            "required": ["personalInfo"]
        }),
        ui_schema: Some(json!({
            "personalInfo": {"ui:description": "Basic personal details"},
            "address": {"ui:description": "Where you live"},
            "skills": {
                "ui:description": "Add your professional skills",
                "items": {"level": {"ui:widget": "select"}}
            }
        })),
        form_data: Some(json!({
            "personalInfo": {"firstName": "Jane", "lastName": "Doe", "birthday": "1990-01-01"},
            "address": {"street": "1 Main Street", "city": "Springfield", "zipCode": "100000"},
            "skills": [
                {"name": "Rust", "level": "advanced"},
                {"name": "TypeScript", "level": "intermediate"}
            ]
        })),
    }
}

fn conditional_form() -> Example {
    Example {
        id: "conditional-form",
        title: "Conditional form",
        description: "Fields that depend on an earlier choice",
        kind: SchemaKind::Form,
        schema: json!({
            "type": "object",
            "title": "Product order",
            "properties": {
                "productType": {
                    "type": "string",
                    "title": "Product type",
                    "enum": ["digital", "physical"],
                    "enumNames": ["Digital", "Physical"]
                },
                "quantity": {"type": "integer", "title": "Quantity", "minimum": 1, "default": 1}
            },
            "dependencies": {
                "productType": {
                    "oneOf": [
                        {
                            "properties": {
                                "productType": {"enum": ["digital"]},
                                "downloadFormat": {
                                    "type": "string",
                                    "title": "Download format",
                                    "enum": ["pdf", "epub", "mobi"],
                                    "enumNames": ["PDF", "EPUB", "MOBI"]
                                },
                                "licenseType": {
                                    "type": "string",
                                    "title": "License",
                                    "enum": ["personal", "commercial"],
                                    "enumNames": ["Personal", "Commercial"]
                                }
                            },
                            "required": ["downloadFormat", "licenseType"]
                        },
                        {
                            "properties": {
                                "productType": {"enum": ["physical"]},
                                "shippingAddress": {
                                    "type": "object",
                                    "title": "Shipping address",
                                    "properties": {
                                        "street": {"type": "string", "title": "Street"},
                                        "city": {"type": "string", "title": "City"},
                                        "zipCode": {"type": "string", "title": "Zip code"}
                                    },
                                    "required": ["street", "city", "zipCode"]
                                },
                                "shippingMethod": {
                                    "type": "string",
                                    "title": "Shipping method",
                                    "enum": ["standard", "express", "overnight"],
                                    "enumNames": ["Standard", "Express", "Overnight"]
                                }
                            },
                            "required": ["shippingAddress", "shippingMethod"]
                        }
                    ]
                }
            },
            "required": ["productType", "quantity"]
        }),
        ui_schema: Some(json!({
            "productType": {"ui:widget": "radio"},
            "quantity": {"ui:widget": "updown"}
        })),
        form_data: Some(json!({
            "productType": "digital",
            "quantity": 1,
            "downloadFormat": "pdf",
            "licenseType": "personal"
        })),
    }
}

fn stats_column(key: &str, title: &str, value: &str, subtitle: &str, color: &str) -> Value {
    json!({
        "type": "void",
        "x-component": "Grid.Col",
        "x-component-props": {"xs": 12, "md": 3},
        "properties": {
            key: {
                "type": "void",
                "x-component": "StatsCard",
                "x-component-props": {
                    "title": title,
                    "value": value,
                    "subtitle": subtitle,
                    "color": color
                }
            }
        }
    })
}

fn dashboard_layout() -> Example {
    Example {
        id: "dashboard-layout",
        title: "Dashboard layout",
        description: "Grid layout with stat cards",
        kind: SchemaKind::Component,
        schema: json!({
            "_isJSONSchemaObject": true,
            "version": "2.0",
            "type": "void",
            "x-component": "Grid.Row",
            "x-component-props": {"spacing": 3},
            "properties": {
                "col1": stats_column("card1", "Total users", "1,234", "+12% on last month", "primary"),
                "col2": stats_column("card2", "Orders", "567", "+8% on last month", "success"),
                "col3": stats_column("card3", "Revenue", "$89,012", "+15% on last month", "warning"),
                "col4": stats_column("card4", "Conversion", "23.5%", "+3% on last month", "error")
            }
        }),
        ui_schema: None,
        form_data: None,
    }
}

fn data_table() -> Example {
    Example {
        id: "data-table",
        title: "Data table",
        description: "Table with an action bar",
        kind: SchemaKind::Component,
        schema: json!({
            "_isJSONSchemaObject": true,
            "version": "2.0",
            "type": "void",
            "x-component": "CardItem",
            "properties": {
                "actions": {
                    "type": "void",
                    "x-component": "ActionBar",
                    "x-component-props": {"style": {"marginBottom": "16px"}},
                    "properties": {
                        "addBtn": {
                            "type": "void",
                            "x-component": "Button",
                            "x-component-props": {"variant": "contained", "children": "Add user"}
                        },
                        "exportBtn": {
                            "type": "void",
                            "x-component": "Button",
                            "x-component-props": {
                                "variant": "outlined",
                                "children": "Export",
                                "sx": {"ml": 1}
                            }
                        }
                    }
                },
                "table": {
                    "type": "void",
                    "x-component": "DataTable",
                    "x-component-props": {
                        "columns": [
                            {"title": "Name", "dataIndex": "name"},
                            {"title": "Email", "dataIndex": "email"},
                            {"title": "Role", "dataIndex": "role"},
                            {"title": "Status", "dataIndex": "status"}
                        ],
                        "data": [
                            {"name": "Ann", "email": "ann@example.com", "role": "Admin", "status": "Active"},
                            {"name": "Bob", "email": "bob@example.com", "role": "User", "status": "Active"},
                            {"name": "Cid", "email": "cid@example.com", "role": "User", "status": "Disabled"}
                        ]
                    }
                }
            }
        }),
        ui_schema: None,
        form_data: None,
    }
}

fn content_layout() -> Example {
    Example {
        id: "content-layout",
        title: "Content layout",
        description: "A mix of content widgets",
        kind: SchemaKind::Component,
        schema: json!({
            "_isJSONSchemaObject": true,
            "version": "2.0",
            "type": "void",
            "x-component": "Box",
            "properties": {
                "alert": {
                    "type": "void",
                    "x-component": "Alert",
                    "x-component-props": {"severity": "info", "children": "This is an informational notice", "sx": {"mb": 2}}
                },
                "progress": {
                    "type": "void",
                    "x-component": "LinearProgress",
                    "x-component-props": {"value": 75, "variant": "determinate", "sx": {"mb": 2}}
                },
                "grid": {
                    "type": "void",
                    "x-component": "Grid.Row",
                    "x-component-props": {"spacing": 2},
                    "properties": {
                        "leftCol": {
                            "type": "void",
                            "x-component": "Grid.Col",
                            "x-component-props": {"xs": 12, "md": 8},
                            "properties": {
                                "mainCard": {
                                    "type": "void",
                                    "x-component": "Card",
                                    "properties": {
                                        "cardContent": {
                                            "type": "void",
                                            "x-component": "CardContent",
                                            "properties": {
                                                "title": {
                                                    "type": "void",
                                                    "x-component": "Typography",
                                                    "x-component-props": {"variant": "h5", "children": "Main content"}
                                                },
                                                "content": {
                                                    "type": "void",
                                                    "x-component": "Typography",
                                                    "x-component-props": {
                                                        "variant": "body1",
                                                        "children": "Put the main information and data here.",
                                                        "sx": {"mt": 2}
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        },
                        "rightCol": {
                            "type": "void",
                            "x-component": "Grid.Col",
                            "x-component-props": {"xs": 12, "md": 4},
                            "properties": {
                                "sidebarCard": {
                                    "type": "void",
                                    "x-component": "Card",
                                    "properties": {
                                        "cardContent": {
                                            "type": "void",
                                            "x-component": "CardContent",
                                            "properties": {
                                                "sidebarTitle": {
                                                    "type": "void",
                                                    "x-component": "Typography",
                                                    "x-component-props": {"variant": "h6", "children": "Sidebar"}
                                                },
                                                "tagContainer": {
                                                    "type": "void",
                                                    "x-component": "Box",
                                                    "x-component-props": {
                                                        "sx": {"mt": 1, "display": "flex", "gap": 1, "flexWrap": "wrap"}
                                                    },
                                                    "properties": {
                                                        "tag1": {
                                                            "type": "void",
                                                            "x-component": "Chip",
                                                            "x-component-props": {"label": "Tag 1", "color": "primary", "size": "small"}
                                                        },
                                                        "tag2": {
                                                            "type": "void",
                                                            "x-component": "Chip",
                                                            "x-component-props": {"label": "Tag 2", "color": "secondary", "size": "small"}
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }),
        ui_schema: None,
        form_data: None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::{classify::classify, compile::Compiler, registry::Registry};

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<_> = examples().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), examples().len());
    }

    #[test]
    fn test_declared_kind_matches_shape() {
        for example in examples() {
            assert_eq!(
                classify(&example.schema),
                Some(example.kind),
                "example {} should classify as {}",
                example.id,
                example.kind
            );
        }
    }

    #[test]
    fn test_component_examples_compile_cleanly() {
        let registry = Registry::standard();
        let compiler = Compiler::new(&registry);
        for example in examples().iter().filter(|e| e.kind == SchemaKind::Component) {
            let tree = compiler
                .compile_document(&example.schema)
                .unwrap_or_else(|e| panic!("{} failed: {e}", example.id));
            assert!(tree.missing_components().is_empty(), "{}", example.id);
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("data-table").map(|e| e.kind), Some(SchemaKind::Component));
        assert!(find("missing").is_none());
        assert_eq!(examples()[0].id, "basic-form");
    }
}
