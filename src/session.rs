//! Editor session: the current field forest and its live preview.
//!
//! The session is the single owner of the current snapshot. An edit is checked
//! against the current tree first and only then moved through it, so a
//! rejected command leaves the tree exactly as it was and an accepted one
//! rebuilds just the nodes along its path.

use tracing::{debug, warn};

use crate::command::EditCommand;
use crate::compiler::{self, Compiled, DuplicateKey, DEFAULT_INDENT};
use crate::domain::FieldForest;
use crate::error::{TreeError, TreeResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Default fields present when the session starts
    pub initial_fields: usize,
    /// Preview indentation in spaces
    pub indent: usize,
    /// Log a warning when an edit makes a key overwrite an earlier one
    pub warn_duplicate_keys: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            initial_fields: 1,
            indent: DEFAULT_INDENT,
            warn_duplicate_keys: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditorSession {
    forest: FieldForest,
    options: SessionOptions,
    revision: u64,
    duplicates: Vec<DuplicateKey>,
}

impl EditorSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            forest: FieldForest::with_default_fields(options.initial_fields),
            options,
            revision: 0,
            duplicates: Vec::new(),
        }
    }

    pub fn forest(&self) -> &FieldForest {
        &self.forest
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Number of edits applied so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Keys overwritten in the current tree
    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }

    pub fn apply(&mut self, command: &EditCommand) -> TreeResult<()> {
        command.check(&self.forest)?;
        // check() rejects everything apply() would, so the move cannot lose the tree
        let forest = std::mem::take(&mut self.forest);
        self.forest = command.apply(forest)?;
        self.revision += 1;
        debug!(revision = self.revision, "Applied edit: {}", command);

        let duplicates = compiler::compile_with_diagnostics(self.forest.nodes()).duplicates;
        if self.options.warn_duplicate_keys {
            for duplicate in newly_reported(&self.duplicates, &duplicates) {
                warn!("Duplicate key '{}': the later field overwrites the earlier one", duplicate);
            }
        }
        self.duplicates = duplicates;
        Ok(())
    }

    /// Apply commands in order, stopping at the first failure.
    ///
    /// On failure the error carries the zero-based position of the failing
    /// command; edits before it stay applied.
    pub fn apply_all<'a, I>(&mut self, commands: I) -> Result<(), (usize, TreeError)>
    where
        I: IntoIterator<Item = &'a EditCommand>,
    {
        for (position, command) in commands.into_iter().enumerate() {
            self.apply(command).map_err(|e| (position, e))?;
        }
        Ok(())
    }

    pub fn compile(&self) -> Compiled {
        compiler::compile_with_diagnostics(self.forest.nodes())
    }

    /// JSON text of the compiled schema
    pub fn preview(&self) -> String {
        self.compile().schema.to_pretty_json(self.options.indent)
    }
}

/// Duplicates in `current` that were not already present in `previous`
fn newly_reported<'a>(
    previous: &'a [DuplicateKey],
    current: &'a [DuplicateKey],
) -> impl Iterator<Item = &'a DuplicateKey> {
    current.iter().filter(move |d| !previous.contains(d))
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
