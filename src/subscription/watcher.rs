use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::Path;
use std::sync::mpsc::{channel, Receiver};
use tracing::{debug, warn};

/// Watches the content root. The returned watcher must be kept alive; each
/// change sends a unit on the receiver and then calls `on_change`.
pub fn content_watcher<F>(
    root: &Path,
    on_change: F,
) -> Result<(RecommendedWatcher, Receiver<()>), notify::Error>
where
    F: Fn() + Send + 'static,
{
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| match res {
        Ok(event) if event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove() => {
            debug!(paths = ?event.paths, "Content changed");
            if tx.send(()).is_ok() {
                on_change();
            }
        }
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Content watcher error"),
    })?;

    watcher.watch(root, RecursiveMode::Recursive)?;
    Ok((watcher, rx))
}

/// Empties the change channel. Returns whether anything changed since the
/// last call, so a burst of events yields a single reload.
pub fn drain_changes(rx: &Receiver<()>) -> bool {
    let mut changed = false;
    while rx.try_recv().is_ok() {
        changed = true;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_write_under_root_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("decks")).unwrap();

        let (repaint_tx, repaint_rx) = channel();
        let (_watcher, rx) = content_watcher(dir.path(), move || {
            let _ = repaint_tx.send(());
        })
        .unwrap();

        fs::write(dir.path().join("decks").join("physics.toml"), "title = \"Physics\"\n").unwrap();

        rx.recv_timeout(Duration::from_secs(5))
            .expect("no change reported");
        repaint_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("change callback not invoked");
    }

    #[test]
    fn test_drain_collapses_bursts() {
        let (tx, rx) = channel();
        assert!(!drain_changes(&rx));

        for _ in 0..3 {
            tx.send(()).unwrap();
        }
        assert!(drain_changes(&rx));
        assert!(!drain_changes(&rx));
    }
}
