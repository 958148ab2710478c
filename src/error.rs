//! Error types for the field tree model

use thiserror::Error;

/// Contract violations raised by field tree edits.
///
/// These are caller bugs rather than user-facing conditions: an empty field
/// name or a duplicate key is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Child or sibling index past the end of its sequence
    #[error("Index {index} out of range for {len} field(s)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Only nested fields may own children
    #[error("Field '{key}' is not nested and cannot hold child fields")]
    NotNested { key: String },

    /// A path-addressed edit needs at least one index
    #[error("Empty field path")]
    EmptyPath,
}

pub type TreeResult<T> = Result<T, TreeError>;
