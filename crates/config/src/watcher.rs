use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Watches the config file and sends a notification whenever it is written.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by renaming a temporary file over the original are picked up,
/// and a file created after startup is noticed too.
///
/// # Example
/// ```no_run
/// # async fn run() {
/// let (_, mut rx) = statusbar_config::ConfigWatcher::spawn("/home/user/.config/statusbar/statusbar.toml");
/// while rx.recv().await.is_some() {
///     // reload
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigWatcher {
    path: PathBuf,
}

impl ConfigWatcher {
    /// Spawn a filesystem watcher for `path` on the current tokio runtime.
    ///
    /// Bursts of events collapse into one notification: the channel holds a
    /// single pending signal.
    pub fn spawn(path: impl AsRef<Path>) -> (Self, mpsc::Receiver<()>) {
        let (tx, rx) = mpsc::channel(1);
        let path = path.as_ref().to_path_buf();
        let watcher = Self { path: path.clone() };

        tokio::spawn(watch_loop(path, tx));

        (watcher, rx)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn concerns(event: &Event, path: &Path) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
        && event.paths.iter().any(|p| p.file_name() == path.file_name())
}

async fn watch_loop(path: PathBuf, tx: mpsc::Sender<()>) {
    let Some(dir) = path.parent().map(Path::to_path_buf) else {
        error!("Config path '{}' has no parent directory", path.display());
        return;
    };

    let (event_tx, mut event_rx) = mpsc::channel::<notify::Result<Event>>(16);

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = event_tx.blocking_send(res);
        },
        Config::default().with_poll_interval(Duration::from_secs(2)),
    ) {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to create filesystem watcher: {e}");
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        warn!("Not watching '{}' for config changes: {e}", dir.display());
        return;
    }

    info!("Watching config file: {}", path.display());

    while let Some(event) = event_rx.recv().await {
        match event {
            Ok(e) if concerns(&e, &path) => {
                debug!(kind = ?e.kind, "Config file changed");
                match tx.try_send(()) {
                    Ok(()) | Err(mpsc::error::TrySendError::Full(())) => {}
                    Err(mpsc::error::TrySendError::Closed(())) => break,
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Watcher error: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn only_writes_to_the_config_file_count() {
        let config = Path::new("/home/u/.config/statusbar/statusbar.toml");

        assert!(concerns(
            &event(EventKind::Modify(ModifyKind::Any), "/home/u/.config/statusbar/statusbar.toml"),
            config,
        ));
        assert!(concerns(
            &event(EventKind::Create(CreateKind::File), "/home/u/.config/statusbar/statusbar.toml"),
            config,
        ));
        assert!(!concerns(
            &event(EventKind::Modify(ModifyKind::Any), "/home/u/.config/statusbar/other.toml"),
            config,
        ));
        assert!(!concerns(
            &event(EventKind::Remove(RemoveKind::File), "/home/u/.config/statusbar/statusbar.toml"),
            config,
        ));
    }
}
