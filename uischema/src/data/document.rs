//! Text to document boundary.
//!
//! Raw editor text goes in, a structured JSON document (or the parser's
//! diagnostic) comes out. The inverse pretty-prints a document with a stable
//! two-space indentation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SchemaError};

/// Parse schema text into a document.
///
/// On failure the returned [`SchemaError::Parse`] carries the parser's native
/// message; callers keep their previous document in effect. Nesting depth is
/// not limited; deep documents grow the stack on demand while parsing.
pub fn parse_document(text: &str) -> Result<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let doc = Value::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(doc)
}

/// Pretty-print a document.
///
/// Returns an empty string when the value cannot be serialized.
pub fn format_document<T: Serialize + ?Sized>(doc: &T) -> String {
    match serde_json::to_string_pretty(doc) {
        Ok(s) => s,
        Err(e) => {
            debug!("document cannot be formatted: {e}");
            String::new()
        }
    }
}

/// JavaScript-style truthiness for JSON values.
///
/// Schema documents are authored by hand, and markers such as `x-component`
/// or `properties` only count when they carry a "real" value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up `key` on an object value and return it only when truthy.
pub fn truthy_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_truthy(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_document() {
        let doc = parse_document(r#"{"type": "object", "properties": {}}"#).unwrap();
        assert_eq!(doc, json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn test_parse_error_keeps_parser_message() {
        let text = r#"{"type": "object",}"#;
        let native = serde_json::from_str::<Value>(text).unwrap_err().to_string();

        match parse_document(text) {
            Err(SchemaError::Parse(msg)) => assert_eq!(msg, native),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_format_uses_two_space_indent() {
        let text = format_document(&json!({"a": {"b": 1}}));
        assert_eq!(text, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
    }

    #[test]
    fn test_format_is_idempotent() {
        let doc = json!({
            "z": [1, 2, {"y": null}],
            "a": "text",
            "m": {"nested": true, "float": 1.5}
        });
        let once = format_document(&doc);
        let twice = format_document(&parse_document(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_format_keeps_full_precision_floats() {
        for i in 1..20_000u32 {
            let v = f64::from(i) * 0.0001 + 1234.5678 / f64::from(i);
            let once = format_document(&json!({"v": v}));
            let twice = format_document(&parse_document(&once).unwrap());
            assert_eq!(once, twice, "float {v} changed after reparsing");
        }
    }

    #[test]
    fn test_parse_deep_document() {
        let depth = 150;
        let mut text = String::new();
        for _ in 0..depth {
            text.push_str(r#"{"x-component": "Box", "properties": {"c": "#);
        }
        text.push_str(r#"{"x-component": "Chip"}"#);
        for _ in 0..depth {
            text.push_str("}}");
        }

        let mut doc = &parse_document(&text).unwrap();
        let mut levels = 0;
        while let Some(child) = doc.get("properties").and_then(|p| p.get("c")) {
            doc = child;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(doc["x-component"], "Chip");

        assert!(matches!(
            parse_document(&text[..text.len() - 1]),
            Err(SchemaError::Parse(_))
        ));
    }

    #[test]
    fn test_trailing_characters_are_rejected() {
        let text = r#"{"a": 1} x"#;
        let native = serde_json::from_str::<Value>(text).unwrap_err().to_string();
        match parse_document(text) {
            Err(SchemaError::Parse(msg)) => assert_eq!(msg, native),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_format_keeps_key_order() {
        let doc = parse_document(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let text = format_document(&doc);
        assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    }

    #[test]
    fn test_format_unserializable_is_empty() {
        use std::collections::HashMap;

        // Maps with non-string keys have no JSON representation.
        let mut map = HashMap::new();
        map.insert(vec![1u8], 1);
        assert_eq!(format_document(&map), "");
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("Box")));
        assert!(is_truthy(&json!(-1)));
    }
}
