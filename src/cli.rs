use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Schema Builder - edit a nested field schema and watch its JSON preview
#[derive(Parser, Debug, Clone)]
#[command(name = "schema-builder", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "SCHEMA_BUILDER_CONFIG", default_value = "schema-builder.toml")]
    pub config: PathBuf,

    /// Spaces per indentation level in the preview
    #[arg(long, env = "SCHEMA_BUILDER_INDENT")]
    pub indent: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SCHEMA_BUILDER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Do not warn when a field overwrites an earlier key
    #[arg(long)]
    pub no_duplicate_warnings: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Edit from stdin one command per line, or replay an edit script
    Edit {
        /// Edit script (.json, .yaml, .yml or .toml) to replay instead of reading stdin
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// With --script, print only the preview after the last edit
        #[arg(long, requires = "script")]
        final_only: bool,
    },
    /// Replay an edit script and again every time the file changes
    Watch {
        /// Edit script to watch
        #[arg(short, long)]
        script: PathBuf,
    },
}

impl Cli {
    /// The subcommand to run; interactive editing when none was given
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Edit {
            script: None,
            final_only: false,
        })
    }
}
