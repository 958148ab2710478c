use anyhow::{Context, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;
use tracing::{error, info};

/// Calls back whenever a watched file changes.
///
/// The parent directory is watched rather than the file itself: editors that
/// save by renaming a temp file over the original replace the inode, and a
/// watch on the old inode would go quiet after the first save.
///
/// Events are handled on a background thread for as long as the watcher is
/// alive; dropping it stops the callbacks.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl FileWatcher {
    pub fn new<F>(path: &Path, on_change: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let file_name = path
            .file_name()
            .map(OsString::from)
            .with_context(|| format!("Not a file path: {}", path.display()))?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let (tx, rx) = channel::<notify::Result<Event>>();

        let mut watcher = RecommendedWatcher::new(tx, Config::default())?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        info!("Watching {}", path.display());

        std::thread::spawn(move || {
            let touches_file =
                |event: &Event| event.paths.iter().any(|p| p.file_name() == Some(file_name.as_os_str()));
            loop {
                match rx.recv() {
                    Ok(Ok(event)) => {
                        if event.kind.is_access() || !touches_file(&event) {
                            continue;
                        }
                        // Editors often write in several steps; let them settle
                        std::thread::sleep(Duration::from_millis(100));
                        while rx.try_recv().is_ok() {}
                        info!("Change detected, reloading...");
                        on_change();
                    }
                    Ok(Err(e)) => error!("Watch error: {:?}", e),
                    Err(e) => {
                        error!("Watch channel error: {:?}", e);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
