pub mod field_editor;
pub mod schema_preview;

use leptos::prelude::*;
use schema_builder::{EditCommand, EditorSession};

/// Apply an edit to the session; a rejected edit leaves the tree unchanged.
pub(crate) fn apply_edit(session: RwSignal<EditorSession>, command: EditCommand) {
    session.update(|s| match s.apply(&command) {
        Ok(()) => log::debug!("Applied '{}' (revision {})", command, s.revision()),
        Err(e) => log::warn!("Rejected '{}': {}", command, e),
    });
}
