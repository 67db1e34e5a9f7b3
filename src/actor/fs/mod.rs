//! FileSystem Actor
//!
//! Watches the source files and the config file, and forwards each batch of
//! changes to the PreviewActor. The watcher starts before the first refresh,
//! so no edit made during startup is lost.
//!
//! ```text
//! Watcher → Debouncer (noise filter) → target filter → PreviewMsg::Changed
//! ```

use std::path::PathBuf;
use std::time::Duration;

use notify::RecommendedWatcher;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc::UnboundedSender;

use super::messages::PreviewMsg;

// Pure timing and deduplication.
mod debouncer;
// Shared fs event types.
mod types;
// Watch root attach/re-attach lifecycle.
mod watch_roots;


use debouncer::Debouncer;
use types::ChangeKind;
use watch_roots::WatchRoots;

pub use types::WatchTargets;

/// FileSystem Actor - watches for file changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    watch_roots: WatchRoots,
    targets: WatchTargets,
    preview_tx: UnboundedSender<PreviewMsg>,
    debouncer: Debouncer,
}

impl FsActor {
    /// Create a new FsActor; events start buffering immediately.
    pub fn new(
        targets: WatchTargets,
        preview_tx: UnboundedSender<PreviewMsg>,
        debounce: Duration,
    ) -> notify::Result<Self> {
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let mut watch_roots = WatchRoots::new(targets.dirs());
        watch_roots.sync(&mut watcher)?;
        crate::debug!("watch"; "watching {} director{}", watch_roots.len(),
            if watch_roots.len() == 1 { "y" } else { "ies" });

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            targets,
            preview_tx,
            debouncer: Debouncer::new(debounce),
        })
    }

    /// Run the actor event loop
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let preview_tx = self.preview_tx;
        let targets = self.targets;
        let mut debouncer = self.debouncer;
        let mut watcher = self.watcher;
        let mut watch_roots = self.watch_roots;

        let (async_tx, mut async_rx) = tokio::sync::mpsc::channel::<notify::Event>(64);

        // notify is sync-only; bridge its channel onto the runtime
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                event = async_rx.recv() => match event {
                    Some(event) => debouncer.add_event(&event),
                    None => break,
                },
                _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                    match watch_roots.sync(&mut watcher) {
                        Ok(0) => {}
                        Ok(n) => crate::debug!("watch"; "re-attached {} director{}", n, if n == 1 { "y" } else { "ies" }),
                        Err(e) => crate::debug!("watch"; "re-attach failed: {}", e),
                    }
                    if process_changes(&mut debouncer, &targets, &preview_tx).is_err() {
                        break;
                    }
                }
            }
        }
    }
}

/// Forward ready changes that touch a watched file.
///
/// Returns `Err(())` if the PreviewActor shut down.
fn process_changes(
    debouncer: &mut Debouncer,
    targets: &WatchTargets,
    preview_tx: &UnboundedSender<PreviewMsg>,
) -> Result<(), ()> {
    let Some(changes) = debouncer.take_if_ready() else {
        return Ok(());
    };

    let Some(paths) = relevant_paths(changes, targets) else {
        return Ok(());
    };

    preview_tx.send(PreviewMsg::Changed(paths)).map_err(|_| ())
}

/// Keep only target files, in a stable order.
fn relevant_paths(
    changes: FxHashMap<PathBuf, ChangeKind>,
    targets: &WatchTargets,
) -> Option<Vec<PathBuf>> {
    let mut relevant: Vec<_> = changes
        .into_iter()
        .filter(|(path, _)| targets.contains(path))
        .collect();
    if relevant.is_empty() {
        return None;
    }
    relevant.sort_by(|a, b| a.0.cmp(&b.0));

    crate::debug_do! {
        for (path, kind) in &relevant {
            crate::debug!("watch"; "{}: {}", kind.label(), path.display());
        }
    }

    Some(relevant.into_iter().map(|(path, _)| path).collect())
}
