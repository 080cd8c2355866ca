//! Form-schema helpers: shape checks and default form data.

use serde_json::{Map, Value};

use super::document::truthy_field;

/// Declared `type` of a form-schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum FormType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl FormType {
    /// Read the declared type of a schema node, if it is one of the known ones.
    pub fn of(node: &Value) -> Option<Self> {
        node.get("type")?.as_str()?.parse().ok()
    }

    /// Zero value for this type. Objects recurse into `node`.
    fn zero(self, node: &Value) -> Value {
        match self {
            FormType::String => Value::String(String::new()),
            FormType::Number | FormType::Integer => Value::from(0),
            FormType::Boolean => Value::Bool(false),
            FormType::Array => Value::Array(Vec::new()),
            FormType::Object => synthesize_defaults(node),
        }
    }
}

/// Whether `schema` has the shape the form engine expects:
/// `type: "object"` together with a `properties` field.
pub fn is_form_schema(schema: &Value) -> bool {
    FormType::of(schema) == Some(FormType::Object) && truthy_field(schema, "properties").is_some()
}

/// Build initial form data for a form-schema node.
///
/// Every declared property gets its `default` when one is present (even
/// `null`), otherwise the zero value of its declared type. Properties with no
/// or an unknown type are left out. A node without `properties` yields an
/// empty object.
pub fn synthesize_defaults(schema: &Value) -> Value {
    let mut data = Map::new();

    let Some(Value::Object(properties)) = schema.get("properties") else {
        return Value::Object(data);
    };

    for (key, property) in properties {
        if let Some(default) = property.get("default") {
            data.insert(key.clone(), default.clone());
        } else if let Some(ty) = FormType::of(property) {
            data.insert(key.clone(), ty.zero(property));
        }
    }

    Value::Object(data)
}
