use thiserror::Error;

use crate::config::{EditorSettings, LogSettings, PreviewSettings, Settings};

/// Widest accepted preview indentation
pub const MAX_INDENT: usize = 8;

/// Upper bound for `editor.initial_fields`
pub const MAX_INITIAL_FIELDS: usize = 64;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_editor(&settings.editor) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_preview(&settings.preview) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_log(&settings.log) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_editor(editor: &EditorSettings) -> Result<(), Vec<ValidationError>> {
        if editor.initial_fields > MAX_INITIAL_FIELDS {
            return Err(vec![ValidationError::InvalidValue {
                field: "editor.initial_fields".to_string(),
                reason: format!("Must be at most {}", MAX_INITIAL_FIELDS),
            }]);
        }
        Ok(())
    }

    fn validate_preview(preview: &PreviewSettings) -> Result<(), Vec<ValidationError>> {
        if preview.indent > MAX_INDENT {
            return Err(vec![ValidationError::InvalidValue {
                field: "preview.indent".to_string(),
                reason: format!("Indentation must be between 0 and {} spaces", MAX_INDENT),
            }]);
        }
        Ok(())
    }

    fn validate_log(log: &LogSettings) -> Result<(), Vec<ValidationError>> {
        if log.level.trim().is_empty() {
            return Err(vec![ValidationError::MissingField("log.level".to_string())]);
        }
        if log.level.parse::<tracing::Level>().is_err() {
            return Err(vec![ValidationError::InvalidValue {
                field: "log.level".to_string(),
                reason: format!(
                    "'{}' is not one of trace, debug, info, warn, error",
                    log.level
                ),
            }]);
        }
        Ok(())
    }
}
