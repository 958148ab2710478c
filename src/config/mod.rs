use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;
pub mod watcher;

use crate::cli::Cli;
use crate::session::SessionOptions;

/// Default configuration file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "schema-builder.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EditorSettings {
    /// Unnamed fields present when a session starts
    #[serde(default = "default_initial_fields")]
    pub initial_fields: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            initial_fields: default_initial_fields(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PreviewSettings {
    /// Spaces per indentation level in the JSON preview
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Log a warning when a later field overwrites an earlier key
    #[serde(default = "default_enabled")]
    pub warn_duplicate_keys: bool,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            warn_duplicate_keys: default_enabled(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogSettings {
    /// trace, debug, info, warn or error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_initial_fields() -> usize {
    1
}

fn default_indent() -> usize {
    crate::compiler::DEFAULT_INDENT
}

fn default_enabled() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Settings {
    /// Load `schema-builder.toml` from `root`, falling back to defaults when
    /// the file is absent.
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        Self::from_file(&Path::new(root).join(DEFAULT_CONFIG_FILE))
    }

    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let settings = Self::load(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Create settings from CLI arguments (config file plus CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI (and its env vars) > config file > defaults
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path).required(false))
            .set_default("editor.initial_fields", default_initial_fields() as i64)?
            .set_default("preview.indent", default_indent() as i64)?
            .set_default("preview.warn_duplicate_keys", default_enabled())?
            .set_default("log.level", default_log_level())?
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(indent) = cli.indent {
            self.preview.indent = indent;
        }
        if let Some(level) = &cli.log_level {
            self.log.level = level.clone();
        }
        if cli.no_duplicate_warnings {
            self.preview.warn_duplicate_keys = false;
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Parsed `log.level`; validation guarantees it parses.
    pub fn log_level(&self) -> tracing::Level {
        self.log.level.parse().unwrap_or(tracing::Level::INFO)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            initial_fields: self.editor.initial_fields,
            indent: self.preview.indent,
            warn_duplicate_keys: self.preview.warn_duplicate_keys,
        }
    }
}
