//! # Schema Builder
//!
//! Schema Builder edits a tree of named, typed fields and compiles it into an
//! ordered JSON object that shows the shape the fields describe.
//!
//! ## Features
//!
//! - **Field tree**: `string`, `number` and `nested` fields, nested to any depth
//! - **Immutable edits**: every edit returns a new tree and leaves the old one intact
//! - **Ordered preview**: keys appear in field order, pretty-printed JSON
//! - **Duplicate detection**: later fields overwrite earlier keys and are reported
//! - **Terminal front end** (feature `cli`): line commands, edit scripts, watch mode
//!
//! ## Quick Start
//!
//! ```rust
//! use schema_builder::{EditCommand, EditorSession, FieldPath, FieldType};
//!
//! let mut session = EditorSession::default();
//! session.apply(&EditCommand::SetKey { path: FieldPath::from(vec![0]), key: "user".into() }).unwrap();
//! session.apply(&EditCommand::SetType { path: FieldPath::from(vec![0]), ty: FieldType::Nested }).unwrap();
//! session.apply(&EditCommand::Append { parent: FieldPath::from(vec![0]) }).unwrap();
//! session.apply(&EditCommand::SetKey { path: FieldPath::from(vec![0, 0]), key: "age".into() }).unwrap();
//! session.apply(&EditCommand::SetType { path: FieldPath::from(vec![0, 0]), ty: FieldType::Number }).unwrap();
//!
//! assert_eq!(session.preview(), "{\n  \"user\": {\n    \"age\": \"number\"\n  }\n}");
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: field nodes, forests and paths with their edit operations
//! - **Compiler**: field forest to ordered schema object and preview text
//! - **Command/Session**: edits as values, applied to a current snapshot
//! - **Config/CLI/Terminal**: settings and the terminal front end

pub mod command;
pub mod compiler;
pub mod domain;
pub mod error;
pub mod session;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod terminal;

pub use command::{CommandError, EditCommand, LineCommand};
pub use compiler::{compile, compile_with_diagnostics, Compiled, DuplicateKey, Schema, SchemaValue};
pub use domain::{FieldForest, FieldNode, FieldPath, FieldType};
pub use error::{TreeError, TreeResult};
pub use session::{EditorSession, SessionOptions};
