//! Edit scripts: a list of commands stored in a JSON, YAML or TOML file.
//!
//! JSON and YAML accept either a bare list or an `edit` table; TOML needs the
//! table form:
//!
//! ```toml
//! [[edit]]
//! op = "append"
//!
//! [[edit]]
//! op = "set_key"
//! path = [0]
//! key = "user"
//! ```

use anyhow::{bail, Context};
use serde::Deserialize;
use std::path::Path;

use super::EditCommand;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ScriptDocument {
    List(Vec<EditCommand>),
    Table { edit: Vec<EditCommand> },
}

impl From<ScriptDocument> for Vec<EditCommand> {
    fn from(doc: ScriptDocument) -> Self {
        match doc {
            ScriptDocument::List(edits) | ScriptDocument::Table { edit: edits } => edits,
        }
    }
}

/// Read and parse an edit script, picking the format from the extension.
pub fn load_script(path: &Path) -> Result<Vec<EditCommand>, anyhow::Error> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read edit script: {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    parse_script(&content, ext).with_context(|| format!("Invalid edit script: {}", path.display()))
}

/// Parse script text in the format named by `ext` (`json`, `yaml`, `yml`, `toml`).
pub fn parse_script(content: &str, ext: &str) -> Result<Vec<EditCommand>, anyhow::Error> {
    let doc: ScriptDocument = match ext {
        "json" => serde_json::from_str(content)?,
        "yaml" | "yml" => serde_yaml::from_str(content)?,
        "toml" => toml::from_str(content)?,
        other => bail!("Unsupported edit script format: '{}'", other),
    };
    Ok(doc.into())
}
