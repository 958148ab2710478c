//! Schema compiler
//!
//! Folds a field forest into an ordered `key -> type` mapping:
//!
//! ```text
//! user (nested)            {
//!   name (string)    ==>     "user": { "name": "string", "age": "number" }
//!   age (number)           }
//! ```
//!
//! Unnamed fields contribute nothing. When two siblings share a key the later
//! one wins and the key keeps the position of its first occurrence.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::fmt;

use crate::domain::{FieldNode, FieldType};

/// Default preview indentation (spaces per level)
pub const DEFAULT_INDENT: usize = 2;

/// Leaf type names as they appear in the compiled schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Number,
}

impl ScalarType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Number => "number",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SchemaValue {
    Scalar(ScalarType),
    Object(Schema),
}

impl SchemaValue {
    pub fn as_object(&self) -> Option<&Schema> {
        match self {
            SchemaValue::Object(schema) => Some(schema),
            SchemaValue::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<ScalarType> {
        match self {
            SchemaValue::Scalar(scalar) => Some(*scalar),
            SchemaValue::Object(_) => None,
        }
    }
}

/// Insertion-ordered mapping produced by [`compile`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema(IndexMap<String, SchemaValue>);

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&SchemaValue> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert to a `serde_json::Value`; key order is kept.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(key, value)| {
                    let value = match value {
                        SchemaValue::Scalar(scalar) => Value::String(scalar.as_str().to_string()),
                        SchemaValue::Object(schema) => schema.to_value(),
                    };
                    (key.clone(), value)
                })
                .collect(),
        )
    }

    /// Render as pretty JSON with `indent` spaces per level.
    pub fn to_pretty_json(&self, indent: usize) -> String {
        let indent = " ".repeat(indent);
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
        if let Err(e) = self.serialize(&mut ser) {
            tracing::error!("Failed to render schema preview: {}", e);
            return "{}".to_string();
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Insert, returning true when an earlier value was overwritten.
    fn assign(&mut self, key: &str, value: SchemaValue) -> bool {
        self.0.insert(key.to_string(), value).is_some()
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pretty_json(DEFAULT_INDENT))
    }
}

/// A key that appeared more than once in the same object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    /// Keys of the enclosing nested fields, outermost first
    pub parents: Vec<String>,
    pub key: String,
}

impl fmt::Display for DuplicateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for parent in &self.parents {
            write!(f, "{}.", parent)?;
        }
        f.write_str(&self.key)
    }
}

/// Compiled schema plus the keys that were silently overwritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compiled {
    pub schema: Schema,
    pub duplicates: Vec<DuplicateKey>,
}

/// Compile a field sequence into a schema. Never fails.
pub fn compile(nodes: &[FieldNode]) -> Schema {
    compile_with_diagnostics(nodes).schema
}

/// Same output as [`compile`], also reporting every overwritten key.
pub fn compile_with_diagnostics(nodes: &[FieldNode]) -> Compiled {
    let mut duplicates = Vec::new();
    let mut parents = Vec::new();
    let schema = compile_level(nodes, &mut parents, &mut duplicates);
    Compiled { schema, duplicates }
}

fn compile_level(
    nodes: &[FieldNode],
    parents: &mut Vec<String>,
    duplicates: &mut Vec<DuplicateKey>,
) -> Schema {
    let mut schema = Schema::new();
    for node in nodes.iter().filter(|n| n.is_named()) {
        let value = match node.field_type() {
            FieldType::String => SchemaValue::Scalar(ScalarType::String),
            FieldType::Number => SchemaValue::Scalar(ScalarType::Number),
            FieldType::Nested => {
                parents.push(node.key().to_string());
                let nested = compile_level(node.children(), parents, duplicates);
                parents.pop();
                SchemaValue::Object(nested)
            }
        };
        if schema.assign(node.key(), value) {
            duplicates.push(DuplicateKey {
                parents: parents.clone(),
                key: node.key().to_string(),
            });
        }
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_forest() {
        assert!(compile(&[]).is_empty());
        assert_eq!(compile(&[]).to_value(), json!({}));
    }

    #[test]
    fn test_single_string_field() {
        let schema = compile(&[FieldNode::leaf("a", FieldType::String)]);
        assert_eq!(schema.to_value(), json!({"a": "string"}));
    }

    #[test]
    fn test_unnamed_field_excluded() {
        let schema = compile(&[FieldNode::new()]);
        assert!(schema.is_empty());

        let schema = compile(&[FieldNode::nested("", vec![FieldNode::leaf("x", FieldType::Number)])]);
        assert!(schema.is_empty());
    }

    #[test]
    fn test_nested_field() {
        let schema = compile(&[FieldNode::nested(
            "a",
            vec![FieldNode::leaf("b", FieldType::Number)],
        )]);
        assert_eq!(schema.to_value(), json!({"a": {"b": "number"}}));
        assert_eq!(
            schema.get("a").and_then(|v| v.as_object()).and_then(|o| o.get("b")),
            Some(&SchemaValue::Scalar(ScalarType::Number))
        );
    }

    #[test]
    fn test_nested_without_children_is_empty_object() {
        let schema = compile(&[FieldNode::nested("meta", vec![])]);
        assert_eq!(schema.to_value(), json!({"meta": {}}));
    }

    #[test]
    fn test_last_write_wins() {
        let compiled = compile_with_diagnostics(&[
            FieldNode::leaf("a", FieldType::String),
            FieldNode::leaf("b", FieldType::String),
            FieldNode::leaf("a", FieldType::Number),
        ]);
        assert_eq!(compiled.schema.to_value(), json!({"a": "number", "b": "string"}));
        // The overwritten key stays where it first appeared
        assert_eq!(compiled.schema.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(compiled.duplicates.len(), 1);
        assert_eq!(compiled.duplicates[0].to_string(), "a");
    }

    #[test]
    fn test_duplicate_location_inside_nested() {
        let compiled = compile_with_diagnostics(&[FieldNode::nested(
            "user",
            vec![
                FieldNode::leaf("id", FieldType::String),
                FieldNode::leaf("id", FieldType::Number),
            ],
        )]);
        assert_eq!(compiled.duplicates[0].parents, vec!["user".to_string()]);
        assert_eq!(compiled.duplicates[0].to_string(), "user.id");
    }

    #[test]
    fn test_key_order_follows_fields() {
        let schema = compile(&[
            FieldNode::leaf("zeta", FieldType::String),
            FieldNode::leaf("alpha", FieldType::String),
            FieldNode::leaf("mid", FieldType::Number),
        ]);
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        let rendered = schema.to_pretty_json(2);
        let zeta = rendered.find("zeta").unwrap();
        let alpha = rendered.find("alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[test]
    fn test_pretty_json_two_space_indent() {
        let schema = compile(&[FieldNode::nested(
            "a",
            vec![FieldNode::leaf("b", FieldType::Number)],
        )]);
        assert_eq!(
            schema.to_pretty_json(DEFAULT_INDENT),
            "{\n  \"a\": {\n    \"b\": \"number\"\n  }\n}"
        );
        assert_eq!(schema.to_string(), schema.to_pretty_json(2));
        assert_eq!(Schema::new().to_pretty_json(2), "{}");
    }

    #[test]
    fn test_pretty_json_custom_indent() {
        let schema = compile(&[FieldNode::leaf("a", FieldType::String)]);
        assert_eq!(schema.to_pretty_json(4), "{\n    \"a\": \"string\"\n}");
    }
}
