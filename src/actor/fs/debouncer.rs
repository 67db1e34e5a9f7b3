use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::EventKind;
use notify::event::ModifyKind;
use rustc_hash::FxHashMap;

use super::types::ChangeKind;
use crate::utils::path::normalize_path;

/// Idle tick when nothing is pending; also paces watch-root re-attach.
const IDLE: Duration = Duration::from_secs(1);

/// Outcome of a second event for a path already pending.
enum Merge {
    Keep,
    Replace(ChangeKind),
    Drop,
}

/// Folds the burst of OS events one save produces into a single change.
///
/// A batch is released once `window` has passed without new events for it.
/// Batches are never held back after that: each one becomes its own refresh.
pub(super) struct Debouncer {
    pub(super) pending: FxHashMap<PathBuf, ChangeKind>,
    /// Kind of the first event per pending path, telling whether the file
    /// existed when the batch started.
    first_seen: FxHashMap<PathBuf, ChangeKind>,
    pub(super) quiet_since: Option<Instant>,
    window: Duration,
}

impl Debouncer {
    pub(super) fn new(window: Duration) -> Self {
        Self {
            pending: FxHashMap::default(),
            first_seen: FxHashMap::default(),
            quiet_since: None,
            window,
        }
    }

    /// Record a notify event. Metadata-only changes and editor artifacts are ignored.
    pub(super) fn add_event(&mut self, event: &notify::Event) {
        let Some(kind) = classify(&event.kind) else {
            return;
        };
        crate::debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);

        for path in event.paths.iter().filter(|p| !is_temp_file(p)) {
            let path = normalize_path(path);

            let first = *self.first_seen.entry(path.clone()).or_insert(kind);
            let merged = match self.pending.get(&path) {
                None => Merge::Replace(kind),
                Some(&pending) => merge(first, pending, kind),
            };

            match merged {
                Merge::Keep => continue,
                Merge::Replace(kind) => {
                    crate::debug!("watch"; "{}: {}", kind.label(), path.display());
                    self.pending.insert(path, kind);
                }
                Merge::Drop => {
                    crate::debug!("watch"; "created and removed: {}", path.display());
                    self.pending.remove(&path);
                    self.first_seen.remove(&path);
                    if self.pending.is_empty() {
                        self.quiet_since = None;
                        continue;
                    }
                }
            }
            self.quiet_since = Some(Instant::now());
        }
    }

    /// Release the pending batch once the window has passed.
    pub(super) fn take_if_ready(&mut self) -> Option<FxHashMap<PathBuf, ChangeKind>> {
        if !self.is_ready() {
            return None;
        }
        self.quiet_since = None;
        self.first_seen.clear();
        Some(std::mem::take(&mut self.pending))
    }

    pub(super) fn is_ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .quiet_since
                .is_some_and(|since| since.elapsed() >= self.window)
    }

    /// How long the actor can sleep before the batch may be ready.
    pub(super) fn sleep_duration(&self) -> Duration {
        match self.quiet_since {
            Some(since) => self
                .window
                .saturating_sub(since.elapsed())
                .max(Duration::from_millis(1)),
            None => IDLE,
        }
    }
}

fn classify(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Created),
        EventKind::Remove(_) => Some(ChangeKind::Removed),
        // mtime/chmod noise would otherwise refresh on every touch
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) => Some(ChangeKind::Modified),
        _ => None,
    }
}

/// Restored files take the new kind and any remove ends as a remove. A file
/// that did not exist at batch start and is gone again is dropped. Anything
/// else keeps the pending kind.
fn merge(first: ChangeKind, pending: ChangeKind, incoming: ChangeKind) -> Merge {
    use ChangeKind::*;
    match (pending, incoming) {
        (Removed, Created | Modified) => Merge::Replace(incoming),
        (Created, Removed) if first == Created => Merge::Drop,
        (Created | Modified, Removed) => Merge::Replace(Removed),
        _ => Merge::Keep,
    }
}

/// Editor swap, backup and atomic-save temp files (including our own).
pub(super) fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();

    name.starts_with(['.', '#'])
        || name.ends_with('~')
        || matches!(ext, "swp" | "swo" | "tmp" | "bak" | "backup" | "bck")
}
