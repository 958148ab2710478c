use anyhow::Context;
use clap::Parser;
use schema_builder::cli::{Cli, Command};
use schema_builder::command::script::load_script;
use schema_builder::config::{watcher::FileWatcher, Settings};
use schema_builder::session::{EditorSession, SessionOptions};
use schema_builder::terminal;
use std::io;
use std::path::Path;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration (file, then CLI and env overrides)
    let settings = Settings::new_with_cli(&cli)?;

    // Logs go to stderr so stdout only carries previews
    tracing_subscriber::fmt()
        .with_max_level(settings.log_level())
        .with_writer(io::stderr)
        .init();

    let options = settings.session_options();
    info!(
        "Starting schema-builder (indent {}, {} initial field(s))",
        options.indent, options.initial_fields
    );

    match cli.command() {
        Command::Edit { script: None, .. } => {
            let mut session = EditorSession::new(options);
            let stdin = io::stdin();
            terminal::run_interactive(
                &mut session,
                stdin.lock(),
                &mut io::stdout(),
                &mut io::stderr(),
            )
        }
        Command::Edit {
            script: Some(path),
            final_only,
        } => {
            let commands = load_script(&path)?;
            info!("Loaded {} edit(s) from {}", commands.len(), path.display());
            let mut session = EditorSession::new(options);
            terminal::run_script(&mut session, &commands, &mut io::stdout(), final_only)
        }
        Command::Watch { script } => watch(&script, options),
    }
}

/// Replay `script` from a fresh session now and on every change.
fn watch(script: &Path, options: SessionOptions) -> anyhow::Result<()> {
    replay(script, &options);

    let path = script.to_path_buf();
    let watcher = FileWatcher::new(script, move || replay(&path, &options))
        .with_context(|| format!("Failed to watch {}", script.display()))?;
    info!("Replaying {} on every save (Ctrl-C to stop)", watcher.path().display());

    loop {
        std::thread::park();
    }
}

fn replay(script: &Path, options: &SessionOptions) {
    let result = load_script(script).and_then(|commands| {
        let mut session = EditorSession::new(options.clone());
        terminal::run_script(&mut session, &commands, &mut io::stdout(), true)
    });
    if let Err(e) = result {
        error!("Failed to replay {}: {:#}", script.display(), e);
    }
}
