//! Rendering surfaces: the sinks a composite document is committed into.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use super::document::CompositeDocument;

/// Errors committing a document into a surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to write preview to `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An isolated, replaceable document context.
///
/// `replace` has clear-then-fully-write semantics: once it returns, the
/// surface shows exactly `document`, never a splice of it and whatever was
/// there before. Replacing the content discards any execution state of the
/// previous document.
pub trait RenderingSurface: Send {
    /// Short name for log lines.
    fn name(&self) -> &str;

    fn replace(&mut self, document: &CompositeDocument) -> Result<(), SurfaceError>;
}

// ============================================================================
// MemorySurface
// ============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    content: String,
    commits: u64,
}

/// In-memory surface. Clones share the same content, so a caller can keep a
/// handle after attaching the surface to an assembler.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    state: Arc<Mutex<MemoryState>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content.
    pub fn content(&self) -> String {
        self.state.lock().content.clone()
    }

    /// Number of completed replacements.
    pub fn commits(&self) -> u64 {
        self.state.lock().commits
    }
}

impl RenderingSurface for MemorySurface {
    fn name(&self) -> &str {
        "memory"
    }

    fn replace(&mut self, document: &CompositeDocument) -> Result<(), SurfaceError> {
        // Clear and write under one lock; readers never see the gap
        let mut state = self.state.lock();
        state.content.clear();
        state.content.push_str(document.as_str());
        state.commits += 1;
        Ok(())
    }
}

// ============================================================================
// FileSurface
// ============================================================================

/// Surface backed by a file on disk.
///
/// Writes a sibling temp file and renames it over the target, so readers of
/// the target see either the old or the new document in full.
#[derive(Debug, Clone)]
pub struct FileSurface {
    path: PathBuf,
    name: String,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = std::ffi::OsString::from(".");
        file_name.push(self.path.file_name().unwrap_or_default());
        file_name.push(".livepen-tmp");
        self.path.with_file_name(file_name)
    }

    fn write(&self, document: &CompositeDocument) -> io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let temp = self.temp_path();
        std::fs::write(&temp, document.as_bytes())?;
        std::fs::rename(&temp, &self.path).inspect_err(|_| {
            let _ = std::fs::remove_file(&temp);
        })
    }
}

impl RenderingSurface for FileSurface {
    fn name(&self) -> &str {
        &self.name
    }

    fn replace(&mut self, document: &CompositeDocument) -> Result<(), SurfaceError> {
        self.write(document).map_err(|source| SurfaceError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
