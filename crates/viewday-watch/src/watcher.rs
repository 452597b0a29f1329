//! Notify-backed vault watcher feeding the debouncer.

use crate::debounce::ChangeDebouncer;
use crate::error::Result;
use crate::events::ChangeEvent;
use notify::{RecursiveMode, Watcher};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, trace, warn};

/// Watches the vault directory and forwards markdown note changes into a
/// [`ChangeDebouncer`].
///
/// The notify callback runs on the watcher's own thread; events cross
/// into the async world over an unbounded channel and are drained by one
/// forwarding task.
pub struct VaultWatcher {
    _watcher: notify::RecommendedWatcher,
    forwarder: JoinHandle<()>,
}

impl VaultWatcher {
    /// Start watching `root` recursively.
    pub fn spawn(root: &Path, debouncer: Arc<ChangeDebouncer>) -> Result<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<ChangeEvent>();

        let mut watcher =
            notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
                match result {
                    Ok(event) => {
                        if let Some(change) = ChangeEvent::from_notify(&event) {
                            // Send fails only when the forwarder is gone,
                            // i.e. the watcher is being torn down.
                            let _ = tx.send(change);
                        }
                    }
                    Err(err) => warn!(error = %err, "watch backend error"),
                }
            })?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        info!(root = %root.display(), "vault watcher started");

        let forwarder = tokio::spawn(async move {
            while let Some(change) = rx.recv().await {
                trace!(path = %change.path.display(), kind = ?change.kind, "vault change");
                debouncer.notify().await;
            }
        });

        Ok(Self {
            _watcher: watcher,
            forwarder,
        })
    }

    /// Stop forwarding changes. The notify backend is dropped with self.
    pub fn shutdown(self) {
        self.forwarder.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::Refresh;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct Counter(AtomicUsize);

    #[async_trait]
    impl Refresh for Counter {
        async fn refresh(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn note_writes_reach_the_refresh_seam() {
        let dir = tempfile::tempdir().unwrap();
        let counter = Arc::new(Counter::default());
        let debouncer = Arc::new(ChangeDebouncer::new(
            Duration::from_millis(10),
            counter.clone(),
        ));
        let watcher = VaultWatcher::spawn(dir.path(), debouncer).unwrap();

        std::fs::write(dir.path().join("note.md"), "---\ndue: 2024-03-01\n---\n").unwrap();

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while counter.0.load(Ordering::SeqCst) == 0 && tokio::time::Instant::now() < deadline {
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        assert!(counter.0.load(Ordering::SeqCst) >= 1);

        watcher.shutdown();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn non_markdown_writes_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let counter = Arc::new(Counter::default());
        let debouncer = Arc::new(ChangeDebouncer::new(
            Duration::from_millis(10),
            counter.clone(),
        ));
        let watcher = VaultWatcher::spawn(dir.path(), debouncer).unwrap();

        std::fs::write(dir.path().join("image.png"), [0u8; 4]).unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);

        watcher.shutdown();
    }
}
