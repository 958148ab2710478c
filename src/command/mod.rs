//! Edit commands
//!
//! Every user action on the field tree is an [`EditCommand`]. Commands come
//! from a front end (a UI event, a typed line, a script file) and are applied
//! to a forest snapshot to produce the next one.
//!
//! Line syntax, with paths written as dot-separated indices:
//!
//! ```text
//! add                  append a top-level field
//! add 0.1              append a child to the nested field at 0.1
//! key 0.1 [NAME]       rename (no NAME clears the name)
//! type 0.1 nested      string | number | nested
//! rm 0.1               delete the field and its subtree
//! show                 print the preview
//! tree                 print the field outline
//! ```
//!
//! Lines are trimmed, so a name typed here cannot start or end with spaces
//! and cannot consist of spaces only. Such names are still valid in the
//! tree; set them through an edit script.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::path::ParsePathError;
use crate::domain::{FieldForest, FieldPath, FieldType, ParseFieldTypeError};
use crate::error::{TreeError, TreeResult};

#[cfg(feature = "cli")]
pub mod script;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing {argument} for '{command}'")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Unexpected argument for '{command}': {argument}")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    #[error(transparent)]
    InvalidPath(#[from] ParsePathError),

    #[error(transparent)]
    InvalidType(#[from] ParseFieldTypeError),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// A structural edit of the field forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    /// Append a default field under `parent` (top level when empty)
    Append {
        #[serde(default)]
        parent: FieldPath,
    },
    SetKey {
        path: FieldPath,
        #[serde(default)]
        key: String,
    },
    SetType {
        path: FieldPath,
        #[serde(rename = "type")]
        ty: FieldType,
    },
    Remove {
        path: FieldPath,
    },
}

impl EditCommand {
    /// Report the error [`apply`](Self::apply) would return, without
    /// touching the forest.
    pub fn check(&self, forest: &FieldForest) -> TreeResult<()> {
        match self {
            EditCommand::Append { parent } if parent.is_empty() => Ok(()),
            EditCommand::Append { parent } => {
                let node = forest.node_at(parent)?;
                if node.is_nested() {
                    Ok(())
                } else {
                    Err(TreeError::NotNested {
                        key: node.key().to_string(),
                    })
                }
            }
            EditCommand::SetKey { path, .. } | EditCommand::SetType { path, .. } => {
                forest.node_at(path).map(|_| ())
            }
            EditCommand::Remove { path } => match path.indices() {
                [] => Err(TreeError::EmptyPath),
                [index] if *index >= forest.len() => Err(TreeError::IndexOutOfRange {
                    index: *index,
                    len: forest.len(),
                }),
                [_] => Ok(()),
                [parent @ .., index] => {
                    let len = forest.node_at(&FieldPath::from(parent))?.children().len();
                    if *index < len {
                        Ok(())
                    } else {
                        Err(TreeError::IndexOutOfRange { index: *index, len })
                    }
                }
            },
        }
    }

    pub fn apply(&self, forest: FieldForest) -> TreeResult<FieldForest> {
        match self {
            EditCommand::Append { parent } => forest.append(parent),
            EditCommand::SetKey { path, key } => forest.set_key_at(path, key.as_str()),
            EditCommand::SetType { path, ty } => forest.set_type_at(path, *ty),
            EditCommand::Remove { path } => forest.remove(path),
        }
    }
}

/// Formats back into line syntax
impl fmt::Display for EditCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditCommand::Append { parent } if parent.is_empty() => write!(f, "add"),
            EditCommand::Append { parent } => write!(f, "add {}", parent),
            EditCommand::SetKey { path, key } if key.is_empty() => write!(f, "key {}", path),
            EditCommand::SetKey { path, key } => write!(f, "key {} {}", path, key),
            EditCommand::SetType { path, ty } => write!(f, "type {} {}", path, ty),
            EditCommand::Remove { path } => write!(f, "rm {}", path),
        }
    }
}

/// One line typed into the terminal editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Edit(EditCommand),
    Show,
    Tree,
}

impl LineCommand {
    /// Parse a line; blank lines and `#` comments yield `None`.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for LineCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word {
            "add" => EditCommand::Append {
                parent: rest.parse()?,
            },
            "key" => {
                let (path, key) = match rest.split_once(char::is_whitespace) {
                    Some((path, key)) => (path, key.trim()),
                    None => (rest, ""),
                };
                EditCommand::SetKey {
                    path: required_path("key", path)?,
                    key: key.to_string(),
                }
            }
            "type" => {
                let (path, ty) = rest.split_once(char::is_whitespace).ok_or(
                    CommandError::MissingArgument {
                        command: "type",
                        argument: "type",
                    },
                )?;
                EditCommand::SetType {
                    path: required_path("type", path)?,
                    ty: ty.parse()?,
                }
            }
            "rm" => EditCommand::Remove {
                path: required_path("rm", rest)?,
            },
            "show" | "tree" if !rest.is_empty() => {
                return Err(CommandError::UnexpectedArgument {
                    command: if word == "show" { "show" } else { "tree" },
                    argument: rest.to_string(),
                })
            }
            "show" => return Ok(LineCommand::Show),
            "tree" => return Ok(LineCommand::Tree),
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(LineCommand::Edit(command))
    }
}

fn required_path(command: &'static str, raw: &str) -> Result<FieldPath, CommandError> {
    let path: FieldPath = raw.parse()?;
    if path.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "path",
        });
    }
    Ok(path)
}
