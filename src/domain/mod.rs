//! Field tree model.
//!
//! A schema is edited as an ordered forest of [`FieldNode`]s. Every edit is a
//! value transform: it consumes a snapshot and returns the next one, so the
//! untouched subtrees are moved rather than copied. Callers that need to keep
//! the previous snapshot clone it before editing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{TreeError, TreeResult};

pub mod forest;
pub mod path;

pub use forest::FieldForest;
pub use path::FieldPath;

/// Declared type of a field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    String,
    Number,
    /// The field holds a sub-schema made of its children
    Nested,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown field type '{0}' (expected string, number or nested)")]
pub struct ParseFieldTypeError(pub String);

impl FieldType {
    pub const ALL: [FieldType; 3] = [FieldType::String, FieldType::Number, FieldType::Nested];

    /// Name used in the compiled schema and in edit commands.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Nested => "nested",
        }
    }

    /// Human-facing label for type selectors.
    pub fn label(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Nested => "Nested",
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, FieldType::Nested)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ParseFieldTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(FieldType::String),
            "number" => Ok(FieldType::Number),
            "nested" => Ok(FieldType::Nested),
            _ => Err(ParseFieldTypeError(s.to_string())),
        }
    }
}

/// One entry in the field tree.
///
/// Fields are private: `children` is non-empty only while the type is
/// [`FieldType::Nested`], and the edit operations below are the only way to
/// change a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldNode {
    key: String,
    #[serde(rename = "type")]
    ty: FieldType,
    children: Vec<FieldNode>,
}

impl FieldNode {
    /// A fresh, unnamed string field.
    pub fn new() -> Self {
        Self::default()
    }

    /// A named field with no children.
    pub fn leaf(key: impl Into<String>, ty: FieldType) -> Self {
        Self {
            key: key.into(),
            ty,
            children: Vec::new(),
        }
    }

    /// A named nested field owning `children`.
    pub fn nested(key: impl Into<String>, children: Vec<FieldNode>) -> Self {
        Self {
            key: key.into(),
            ty: FieldType::Nested,
            children,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn field_type(&self) -> FieldType {
        self.ty
    }

    pub fn children(&self) -> &[FieldNode] {
        &self.children
    }

    pub fn is_nested(&self) -> bool {
        self.ty.is_nested()
    }

    /// Unnamed fields are left out of the compiled schema.
    pub fn is_named(&self) -> bool {
        !self.key.is_empty()
    }

    #[must_use]
    pub fn set_key(self, key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..self
        }
    }

    /// Change the declared type.
    ///
    /// Moving away from `Nested` drops every child at once; there is no way
    /// to get the subtree back.
    #[must_use]
    pub fn set_type(self, ty: FieldType) -> Self {
        let children = if ty.is_nested() { self.children } else { Vec::new() };
        Self {
            key: self.key,
            ty,
            children,
        }
    }

    /// Append a default child to a nested field.
    pub fn append_child(mut self) -> TreeResult<Self> {
        if !self.is_nested() {
            return Err(TreeError::NotNested { key: self.key });
        }
        self.children.push(FieldNode::new());
        Ok(self)
    }

    pub fn replace_child_at(mut self, index: usize, child: FieldNode) -> TreeResult<Self> {
        let len = self.children.len();
        let slot = self
            .children
            .get_mut(index)
            .ok_or(TreeError::IndexOutOfRange { index, len })?;
        *slot = child;
        Ok(self)
    }

    /// Remove a child; later siblings shift left and keep their order.
    pub fn remove_child_at(mut self, index: usize) -> TreeResult<Self> {
        let len = self.children.len();
        if index >= len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        self.children.remove(index);
        Ok(self)
    }

    /// Apply `f` to the descendant reached by `rest`, rebuilding only the
    /// nodes along the way. An empty `rest` targets this node.
    pub(crate) fn update_descendant<F>(mut self, rest: &[usize], f: F) -> TreeResult<Self>
    where
        F: FnOnce(FieldNode) -> TreeResult<FieldNode>,
    {
        let Some((&index, rest)) = rest.split_first() else {
            return f(self);
        };
        let len = self.children.len();
        let slot = self
            .children
            .get_mut(index)
            .ok_or(TreeError::IndexOutOfRange { index, len })?;
        let child = std::mem::take(slot);
        *slot = child.update_descendant(rest, f)?;
        Ok(self)
    }
}
