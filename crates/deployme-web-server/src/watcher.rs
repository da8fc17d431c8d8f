//! File watching for live reload.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// Site configuration was modified
    ConfigModified(PathBuf),

    /// File was created
    Created(PathBuf),

    /// File was deleted
    Deleted(PathBuf),

    /// Generic modification
    Modified(PathBuf),
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Create a new file watcher for the given paths. Missing paths are skipped.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        paths: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        for path in paths {
            if path.exists() {
                watcher
                    .watch(path, RecursiveMode::Recursive)
                    .map_err(std::io::Error::other)?;
            } else {
                tracing::debug!("Not watching missing path {}", path.display());
            }
        }

        // Forward events from the notify thread into the async channel
        std::thread::spawn(move || {
            let mut last_event_time = std::time::Instant::now();
            let debounce_duration = Duration::from_millis(100);

            while let Ok(event) = sync_rx.recv() {
                // Debounce rapid events
                let now = std::time::Instant::now();
                if now.duration_since(last_event_time) < debounce_duration {
                    continue;
                }
                last_event_time = now;

                for path in event.paths {
                    if let Some(e) = classify_event(&path, &event.kind) {
                        if async_tx.blocking_send(e).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    let is_config = path.extension().and_then(|e| e.to_str()) == Some("toml");

    match kind {
        EventKind::Create(_) if is_config => Some(WatchEvent::ConfigModified(path.to_path_buf())),
        EventKind::Modify(_) if is_config => Some(WatchEvent::ConfigModified(path.to_path_buf())),
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) => Some(WatchEvent::Modified(path.to_path_buf())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};
    use notify::EventKind;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn classifies_config_changes() {
        let path = Path::new("site.toml");

        assert_eq!(
            classify_event(path, &EventKind::Modify(ModifyKind::Any)),
            Some(WatchEvent::ConfigModified(path.to_path_buf()))
        );
        assert_eq!(
            classify_event(path, &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::ConfigModified(path.to_path_buf()))
        );
    }

    #[test]
    fn classifies_public_file_changes() {
        let path = Path::new("public/imgs/ray/raycast-untitled.svg");

        assert_eq!(
            classify_event(path, &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::Created(path.to_path_buf()))
        );
        assert_eq!(
            classify_event(path, &EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::Deleted(path.to_path_buf()))
        );
        assert_eq!(
            classify_event(path, &EventKind::Modify(ModifyKind::Any)),
            Some(WatchEvent::Modified(path.to_path_buf()))
        );
        assert_eq!(classify_event(path, &EventKind::Any), None);
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let test_file = temp.path().join("logo.svg");

        let (watcher, mut rx) = FileWatcher::new(&[temp.path().to_path_buf()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(&test_file, "<svg/>").unwrap();

        let event = tokio::time::timeout(Duration::from_secs(3), rx.recv()).await;

        drop(watcher);

        assert!(event.is_ok(), "timeout waiting for file watch event");
        assert!(event.unwrap().is_some(), "channel should not be closed");
    }

    #[test]
    fn skips_missing_paths() {
        let temp = tempdir().unwrap();
        assert!(FileWatcher::new(&[temp.path().join("missing")]).is_ok());
    }
}
