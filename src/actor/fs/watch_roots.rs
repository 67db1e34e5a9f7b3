use std::path::PathBuf;

use notify::{RecursiveMode, Watcher};
use rustc_hash::FxHashSet;

/// Directories the watcher should be attached to.
///
/// A directory that is missing at startup, or removed and recreated later,
/// is attached on the next `sync` after it exists again.
pub(super) struct WatchRoots {
    wanted: Vec<PathBuf>,
    live: FxHashSet<PathBuf>,
}

impl WatchRoots {
    pub(super) fn new(wanted: Vec<PathBuf>) -> Self {
        Self {
            wanted,
            live: FxHashSet::default(),
        }
    }

    /// Attach every wanted directory that exists and is not attached yet.
    ///
    /// Returns how many were newly attached.
    pub(super) fn sync(&mut self, watcher: &mut impl Watcher) -> notify::Result<usize> {
        self.live.retain(|dir| dir.is_dir());

        let mut attached = 0;
        for dir in &self.wanted {
            if self.live.contains(dir) || !dir.is_dir() {
                continue;
            }
            watcher.watch(dir, RecursiveMode::NonRecursive)?;
            self.live.insert(dir.clone());
            attached += 1;
        }
        Ok(attached)
    }

    pub(super) fn len(&self) -> usize {
        self.live.len()
    }
}
