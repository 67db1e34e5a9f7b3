use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;

use crate::config::ProjectConfig;

/// What happened to a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub(super) fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// The files whose changes matter: the three sources and the config file.
#[derive(Debug, Clone, Default)]
pub struct WatchTargets {
    files: FxHashSet<PathBuf>,
}

impl WatchTargets {
    pub fn new(files: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            files: files.into_iter().collect(),
        }
    }

    pub fn from_config(config: &ProjectConfig) -> Self {
        let sources = config.sources.paths();
        let files = sources
            .iter()
            .map(|(_, path)| path.to_path_buf())
            .chain(std::iter::once(config.config_path.clone()));
        Self::new(files)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Parent directories to watch, deduplicated.
    ///
    /// Directories are watched rather than files so editors that save by
    /// writing a new file and renaming it over the old one are still seen.
    pub fn dirs(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = self
            .files
            .iter()
            .filter_map(|path| path.parent().map(Path::to_path_buf))
            .collect();
        dirs.sort();
        dirs.dedup();
        dirs
    }
}
