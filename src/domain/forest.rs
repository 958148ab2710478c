//! The top-level field sequence and path-addressed edits.

use serde::Serialize;
use std::fmt;

use super::{FieldNode, FieldPath, FieldType};
use crate::error::{TreeError, TreeResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldForest(Vec<FieldNode>);

impl FieldForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// A forest of `count` default fields.
    pub fn with_default_fields(count: usize) -> Self {
        Self(vec![FieldNode::new(); count])
    }

    pub fn nodes(&self) -> &[FieldNode] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldNode> {
        self.0.iter()
    }

    #[must_use]
    pub fn append_node(mut self) -> Self {
        self.0.push(FieldNode::new());
        self
    }

    pub fn replace_at(mut self, index: usize, node: FieldNode) -> TreeResult<Self> {
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(TreeError::IndexOutOfRange { index, len })?;
        *slot = node;
        Ok(self)
    }

    pub fn remove_at(mut self, index: usize) -> TreeResult<Self> {
        let len = self.0.len();
        if index >= len {
            return Err(TreeError::IndexOutOfRange { index, len });
        }
        self.0.remove(index);
        Ok(self)
    }

    /// Look up the node at `path`.
    pub fn get(&self, path: &FieldPath) -> Option<&FieldNode> {
        self.node_at(path).ok()
    }

    /// Like [`get`](Self::get), but says which index was out of range.
    pub fn node_at(&self, path: &FieldPath) -> TreeResult<&FieldNode> {
        let (&first, rest) = path
            .indices()
            .split_first()
            .ok_or(TreeError::EmptyPath)?;
        let mut node = self.0.get(first).ok_or(TreeError::IndexOutOfRange {
            index: first,
            len: self.0.len(),
        })?;
        for &index in rest {
            let len = node.children().len();
            node = node
                .children()
                .get(index)
                .ok_or(TreeError::IndexOutOfRange { index, len })?;
        }
        Ok(node)
    }

    /// Replace the node at `path` with `f(node)`.
    ///
    /// Only the ancestors of the target are rebuilt; siblings off the path
    /// are moved into the new snapshot untouched.
    pub fn update_at<F>(mut self, path: &FieldPath, f: F) -> TreeResult<Self>
    where
        F: FnOnce(FieldNode) -> TreeResult<FieldNode>,
    {
        let (&index, rest) = path
            .indices()
            .split_first()
            .ok_or(TreeError::EmptyPath)?;
        let len = self.0.len();
        let slot = self
            .0
            .get_mut(index)
            .ok_or(TreeError::IndexOutOfRange { index, len })?;
        let node = std::mem::take(slot);
        *slot = node.update_descendant(rest, f)?;
        Ok(self)
    }

    pub fn set_key_at(self, path: &FieldPath, key: impl Into<String>) -> TreeResult<Self> {
        let key = key.into();
        self.update_at(path, |node| Ok(node.set_key(key)))
    }

    pub fn set_type_at(self, path: &FieldPath, ty: FieldType) -> TreeResult<Self> {
        self.update_at(path, |node| Ok(node.set_type(ty)))
    }

    pub fn append_child_at(self, path: &FieldPath) -> TreeResult<Self> {
        self.update_at(path, FieldNode::append_child)
    }

    pub fn replace(self, path: &FieldPath, replacement: FieldNode) -> TreeResult<Self> {
        self.update_at(path, |_| Ok(replacement))
    }

    /// Append a default field under `parent`, or at the top level when
    /// `parent` is the root path.
    pub fn append(self, parent: &FieldPath) -> TreeResult<Self> {
        if parent.is_empty() {
            Ok(self.append_node())
        } else {
            self.append_child_at(parent)
        }
    }

    /// Delete the node at `path` together with its whole subtree.
    pub fn remove(self, path: &FieldPath) -> TreeResult<Self> {
        match path.indices() {
            [] => Err(TreeError::EmptyPath),
            [index] => self.remove_at(*index),
            [parent @ .., index] => {
                let index = *index;
                self.update_at(&FieldPath::from(parent), |node| node.remove_child_at(index))
            }
        }
    }
}

impl From<Vec<FieldNode>> for FieldForest {
    fn from(nodes: Vec<FieldNode>) -> Self {
        Self(nodes)
    }
}

impl<'a> IntoIterator for &'a FieldForest {
    type Item = &'a FieldNode;
    type IntoIter = std::slice::Iter<'a, FieldNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Indented outline, one line per field: `0.1  name: string`.
impl fmt::Display for FieldForest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_nodes(
            f: &mut fmt::Formatter<'_>,
            nodes: &[FieldNode],
            parent: &FieldPath,
        ) -> fmt::Result {
            for (index, node) in nodes.iter().enumerate() {
                let path = parent.child(index);
                let indent = "  ".repeat(parent.depth());
                let key = if node.is_named() { node.key() } else { "(unnamed)" };
                writeln!(f, "{}{}  {}: {}", indent, path, key, node.field_type())?;
                write_nodes(f, node.children(), &path)?;
            }
            Ok(())
        }

        if self.is_empty() {
            return writeln!(f, "(no fields)");
        }
        write_nodes(f, &self.0, &FieldPath::root())
    }
}
