use serde_json::{Number, Value};

use super::form::FormType;
use crate::error::{Result, SchemaError};

/// One field of a form schema, as laid out by the preview engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Property name in the parent object.
    pub key: String,
    /// Display title, falling back to the key.
    pub title: String,
    pub description: Option<String>,
    /// Listed in the parent's `required` array.
    pub required: bool,
    /// Value type and nested structure.
    pub kind: FieldKind,
}

/// Supported field kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text, with an optional `format` hint such as `email` or `date`.
    String { format: Option<String> },
    Number,
    Integer,
    Boolean,
    /// Choice among fixed values.
    Enum(EnumItem),
    /// Sequence of values; `items` describes one element when known.
    Array(ArrayItem),
    /// Nested object with its own fields.
    Object(Vec<Field>),
}

/// Enum variants with their display labels.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumItem {
    /// Allowed values, in schema order.
    pub variants: Vec<Value>,
    /// Labels from `enumNames`, or the variant text.
    pub labels: Vec<String>,
}

/// Array element description.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    /// Element field, when `items` declares a supported type.
    pub items: Option<Box<Field>>,
}

fn variant_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl EnumItem {
    fn from_schema(node: &Value, variants: &[Value]) -> Self {
        let names = node.get("enumNames").and_then(Value::as_array);
        let labels = variants
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                names
                    .and_then(|n| n.get(idx))
                    .and_then(Value::as_str)
                    .map(String::from)
                    .unwrap_or_else(|| variant_text(v))
            })
            .collect();
        EnumItem {
            variants: variants.to_vec(),
            labels,
        }
    }

    /// Label of the variant equal to `value`, if any.
    pub fn label_of(&self, value: &Value) -> Option<&str> {
        self.variants
            .iter()
            .position(|v| v == value)
            .map(|idx| self.labels[idx].as_str())
    }

    /// Pick a variant by its value text, its label, or its index.
    pub fn select(&self, raw: &str, path: &str) -> Result<Value> {
        if let Some(idx) = self
            .variants
            .iter()
            .position(|v| variant_text(v) == raw)
            .or_else(|| self.labels.iter().position(|l| l == raw))
        {
            return Ok(self.variants[idx].clone());
        }

        if let Ok(idx) = raw.parse::<usize>()
            && let Some(v) = self.variants.get(idx)
        {
            return Ok(v.clone());
        }

        Err(SchemaError::TypeMismatch {
            path: path.to_string(),
            expected: format!("one of: {:?}", self.labels),
            actual: raw.to_string(),
        })
    }
}

impl Field {
    /// Build a field from a property schema.
    ///
    /// Returns `None` for properties whose type the form layout cannot show.
    pub fn from_schema(key: &str, node: &Value, required: bool) -> Option<Field> {
        let kind = FieldKind::from_schema(node)?;
        Some(Field {
            key: key.to_string(),
            title: node
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or(key)
                .to_string(),
            description: node
                .get("description")
                .and_then(Value::as_str)
                .map(String::from),
            required,
            kind,
        })
    }

    /// Fields of an object schema, in declared order.
    pub fn fields_of(node: &Value) -> Vec<Field> {
        let required: Vec<&str> = node
            .get("required")
            .and_then(Value::as_array)
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        node.get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .filter_map(|(k, v)| Field::from_schema(k, v, required.contains(&k.as_str())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find a nested field by path segments.
    pub fn find<'a>(fields: &'a [Field], path: &[&str]) -> Option<&'a Field> {
        let (first, rest) = path.split_first()?;
        let field = fields.iter().find(|f| f.key == *first)?;
        if rest.is_empty() {
            return Some(field);
        }
        match &field.kind {
            FieldKind::Object(children) => Field::find(children, rest),
            _ => None,
        }
    }
}

impl FieldKind {
    fn from_schema(node: &Value) -> Option<FieldKind> {
        if let Some(variants) = node.get("enum").and_then(Value::as_array) {
            return Some(FieldKind::Enum(EnumItem::from_schema(node, variants)));
        }

        let kind = match FormType::of(node)? {
            FormType::String => FieldKind::String {
                format: node.get("format").and_then(Value::as_str).map(String::from),
            },
            FormType::Number => FieldKind::Number,
            FormType::Integer => FieldKind::Integer,
            FormType::Boolean => FieldKind::Boolean,
            FormType::Array => {
                let items = node.get("items");
                FieldKind::Array(ArrayItem {
                    items: items
                        .and_then(|i| Field::from_schema("items", i, false))
                        .map(Box::new),
                })
            }
            FormType::Object => FieldKind::Object(Field::fields_of(node)),
        };
        Some(kind)
    }

    /// Short type name for display.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String { .. } => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum(_) => "enum",
            FieldKind::Array(_) => "array",
            FieldKind::Object(_) => "object",
        }
    }

    /// Whether `value` has the shape this kind stores.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldKind::String { .. }, Value::String(_)) => true,
            (FieldKind::Number, Value::Number(_)) => true,
            (FieldKind::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (FieldKind::Boolean, Value::Bool(_)) => true,
            (FieldKind::Enum(item), v) => item.variants.contains(v),
            (FieldKind::Array(_), Value::Array(_)) => true,
            (FieldKind::Object(_), Value::Object(_)) => true,
            _ => false,
        }
    }

    /// Convert raw user input into a value of this kind.
    pub fn coerce(&self, raw: &str, path: &str) -> Result<Value> {
        let mismatch = |expected: &str| SchemaError::TypeMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: raw.to_string(),
        };

        match self {
            FieldKind::String { .. } => Ok(Value::String(raw.to_string())),
            FieldKind::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| mismatch("integer")),
            FieldKind::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| mismatch("number")),
            FieldKind::Boolean => raw
                .trim()
                .parse::<bool>()
                .map(Value::Bool)
                .map_err(|_| mismatch("boolean")),
            FieldKind::Enum(enum_item) => enum_item.select(raw, path),
            FieldKind::Array(array_item) => {
                if raw.trim_start().starts_with('[') {
                    let value: Value =
                        serde_json::from_str(raw).map_err(|_| mismatch("array"))?;
                    return match value {
                        Value::Array(_) => Ok(value),
                        _ => Err(mismatch("array")),
                    };
                }
                let element = array_item.items.as_ref().map(|f| &f.kind);
                let mut values = Vec::new();
                for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                    match element {
                        Some(kind @ (FieldKind::Object(_) | FieldKind::Array(_))) => {
                            return Err(mismatch(&format!("JSON array of {}", kind.type_name())));
                        }
                        Some(kind) => values.push(kind.coerce(part, path)?),
                        None => values.push(Value::String(part.to_string())),
                    }
                }
                Ok(Value::Array(values))
            }
            FieldKind::Object(_) => match serde_json::from_str::<Value>(raw) {
                Ok(value @ Value::Object(_)) => Ok(value),
                _ => Err(mismatch("JSON object")),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn basic_fields() -> Vec<Field> {
        Field::fields_of(&json!({
            "type": "object",
            "properties": {
                "name": {"type": "string", "title": "Name"},
                "email": {"type": "string", "format": "email"},
                "age": {"type": "integer", "minimum": 18},
                "gender": {
                    "type": "string",
                    "enum": ["male", "female", "other"],
                    "enumNames": ["Male", "Female", "Other"]
                },
                "address": {
                    "type": "object",
                    "properties": {"city": {"type": "string"}}
                },
                "tags": {"type": "array", "items": {"type": "integer"}},
                "skip": {"type": ["string", "null"]}
            },
            "required": ["name", "age"]
        }))
    }

    #[test]
    fn test_fields_layout() {
        let fields = basic_fields();
        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "email", "age", "gender", "address", "tags"]);

        assert_eq!(fields[0].title, "Name");
        assert!(fields[0].required);
        assert_eq!(fields[1].title, "email", "title falls back to the key");
        assert!(!fields[1].required);
        assert_eq!(
            fields[1].kind,
            FieldKind::String {
                format: Some("email".into())
            }
        );
    }

    #[test]
    fn test_find_nested() {
        let fields = basic_fields();
        let city = Field::find(&fields, &["address", "city"]).unwrap();
        assert_eq!(city.kind.type_name(), "string");
        assert!(Field::find(&fields, &["name", "city"]).is_none());
        assert!(Field::find(&fields, &["missing"]).is_none());
    }

    #[test]
    fn test_coerce_scalars() {
        let fields = basic_fields();
        let age = &Field::find(&fields, &["age"]).unwrap().kind;
        assert_eq!(age.coerce("30", "age").unwrap(), json!(30));
        assert!(matches!(
            age.coerce("thirty", "age"),
            Err(SchemaError::TypeMismatch { .. })
        ));

        assert_eq!(FieldKind::Number.coerce("1.5", "x").unwrap(), json!(1.5));
        assert_eq!(FieldKind::Boolean.coerce("true", "x").unwrap(), json!(true));
        assert!(FieldKind::Boolean.coerce("yes", "x").is_err());
    }

    #[test]
    fn test_coerce_enum() {
        let fields = basic_fields();
        let gender = &Field::find(&fields, &["gender"]).unwrap().kind;
        assert_eq!(gender.coerce("female", "gender").unwrap(), json!("female"));
        assert_eq!(gender.coerce("Other", "gender").unwrap(), json!("other"));
        assert_eq!(gender.coerce("0", "gender").unwrap(), json!("male"));
        assert!(gender.coerce("unknown", "gender").is_err());

        let FieldKind::Enum(item) = gender else {
            panic!("gender should be an enum");
        };
        assert_eq!(item.label_of(&json!("female")), Some("Female"));
    }

    #[test]
    fn test_coerce_array() {
        let fields = basic_fields();
        let tags = &Field::find(&fields, &["tags"]).unwrap().kind;
        assert_eq!(tags.coerce("1, 2,3", "tags").unwrap(), json!([1, 2, 3]));
        assert_eq!(tags.coerce("[4, 5]", "tags").unwrap(), json!([4, 5]));
        assert!(tags.coerce("1, two", "tags").is_err());
        assert_eq!(tags.coerce("", "tags").unwrap(), json!([]));
    }

    #[test]
    fn test_accepts() {
        fn kind<'a>(fields: &'a [Field], name: &str) -> &'a FieldKind {
            &Field::find(fields, &[name]).unwrap().kind
        }

        let fields = basic_fields();
        assert!(kind(&fields, "age").accepts(&json!(20)));
        assert!(!kind(&fields, "age").accepts(&json!(20.5)));
        assert!(!kind(&fields, "name").accepts(&json!(1)));
        assert!(kind(&fields, "gender").accepts(&json!("other")));
        assert!(!kind(&fields, "gender").accepts(&json!("robot")));
        assert!(kind(&fields, "address").accepts(&json!({})));
    }

    #[test]
    fn test_coerce_object() {
        let fields = basic_fields();
        let address = &Field::find(&fields, &["address"]).unwrap().kind;
        assert_eq!(
            address.coerce(r#"{"city": "Beijing"}"#, "address").unwrap(),
            json!({"city": "Beijing"})
        );
        assert!(address.coerce("Beijing", "address").is_err());
    }
}
