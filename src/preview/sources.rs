//! The three source texts: structure (markup), style and behavior (script).

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Which of the three editor panels a text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceRole {
    Structure,
    Style,
    Behavior,
}

impl SourceRole {
    pub const ALL: [Self; 3] = [Self::Structure, Self::Style, Self::Behavior];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Style => "style",
            Self::Behavior => "behavior",
        }
    }

    /// File name used when a project does not configure one.
    pub const fn default_file(self) -> &'static str {
        match self {
            Self::Structure => "index.html",
            Self::Style => "style.css",
            Self::Behavior => "script.js",
        }
    }
}

impl fmt::Display for SourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Synchronous read access to the current value of each panel.
pub trait SourceTexts {
    fn structure_text(&self) -> &str;
    fn style_text(&self) -> &str;
    fn behavior_text(&self) -> &str;

    /// Read all three texts exactly once into an owned snapshot.
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            structure: self.structure_text().to_owned(),
            style: self.style_text().to_owned(),
            behavior: self.behavior_text().to_owned(),
        }
    }
}

/// Owned copy of the three texts, taken at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub structure: String,
    pub style: String,
    pub behavior: String,
}

impl Snapshot {
    pub fn new(
        structure: impl Into<String>,
        style: impl Into<String>,
        behavior: impl Into<String>,
    ) -> Self {
        Self {
            structure: structure.into(),
            style: style.into(),
            behavior: behavior.into(),
        }
    }

    /// Total byte length of the three texts.
    pub fn len(&self) -> usize {
        self.structure.len() + self.style.len() + self.behavior.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SourceTexts for Snapshot {
    fn structure_text(&self) -> &str {
        &self.structure
    }
    fn style_text(&self) -> &str {
        &self.style
    }
    fn behavior_text(&self) -> &str {
        &self.behavior
    }

    fn snapshot(&self) -> Snapshot {
        self.clone()
    }
}

// ============================================================================
// Panels (mutable editor buffers)
// ============================================================================

/// Mutable-over-time editor buffers, one per role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Panels {
    structure: String,
    style: String,
    behavior: String,
}

impl Panels {
    pub fn new(
        structure: impl Into<String>,
        style: impl Into<String>,
        behavior: impl Into<String>,
    ) -> Self {
        Self {
            structure: structure.into(),
            style: style.into(),
            behavior: behavior.into(),
        }
    }

    pub fn get(&self, role: SourceRole) -> &str {
        match role {
            SourceRole::Structure => &self.structure,
            SourceRole::Style => &self.style,
            SourceRole::Behavior => &self.behavior,
        }
    }

    pub fn set(&mut self, role: SourceRole, text: impl Into<String>) {
        *self.slot_mut(role) = text.into();
    }

    fn slot_mut(&mut self, role: SourceRole) -> &mut String {
        match role {
            SourceRole::Structure => &mut self.structure,
            SourceRole::Style => &mut self.style,
            SourceRole::Behavior => &mut self.behavior,
        }
    }
}

impl SourceTexts for Panels {
    fn structure_text(&self) -> &str {
        &self.structure
    }
    fn style_text(&self) -> &str {
        &self.style
    }
    fn behavior_text(&self) -> &str {
        &self.behavior
    }
}

// ============================================================================
// File-backed panels
// ============================================================================

/// Errors reading a source file into its panel.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {role} source `{path}`")]
    Io {
        role: SourceRole,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } => path,
        }
    }
}

/// Location of each source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub structure: PathBuf,
    pub style: PathBuf,
    pub behavior: PathBuf,
}

impl SourcePaths {
    /// Default file names joined onto `root`.
    pub fn in_dir(root: &Path) -> Self {
        Self {
            structure: root.join(SourceRole::Structure.default_file()),
            style: root.join(SourceRole::Style.default_file()),
            behavior: root.join(SourceRole::Behavior.default_file()),
        }
    }

    pub fn get(&self, role: SourceRole) -> &Path {
        match role {
            SourceRole::Structure => &self.structure,
            SourceRole::Style => &self.style,
            SourceRole::Behavior => &self.behavior,
        }
    }

    /// Role whose file is `path`, if any.
    pub fn role_of(&self, path: &Path) -> Option<SourceRole> {
        SourceRole::ALL
            .into_iter()
            .find(|&role| self.get(role) == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SourceRole, &Path)> {
        SourceRole::ALL.into_iter().map(|role| (role, self.get(role)))
    }
}

/// Panels whose content comes from three files on disk.
///
/// A missing file is an empty panel. Any other read failure is reported and
/// leaves the panels untouched.
#[derive(Debug, Clone)]
pub struct FileSources {
    paths: SourcePaths,
    panels: Panels,
}

impl FileSources {
    /// Create with empty panels; nothing is read yet.
    pub fn new(paths: SourcePaths) -> Self {
        Self {
            paths,
            panels: Panels::default(),
        }
    }

    /// Create and read all three files.
    pub fn open(paths: SourcePaths) -> Result<Self, SourceError> {
        let mut sources = Self::new(paths);
        sources.load_all()?;
        Ok(sources)
    }

    /// Re-read every file. Either all panels update or none do.
    pub fn load_all(&mut self) -> Result<(), SourceError> {
        let mut next = Panels::default();
        for (role, path) in self.paths.iter() {
            next.set(role, read_source(role, path)?);
        }
        self.panels = next;
        Ok(())
    }

    /// Re-read the file at `path` if it is one of the sources.
    ///
    /// Returns the role that was reloaded, or `None` for unrelated paths.
    pub fn reload(&mut self, path: &Path) -> Result<Option<SourceRole>, SourceError> {
        let Some(role) = self.paths.role_of(path) else {
            return Ok(None);
        };
        let text = read_source(role, path)?;
        self.panels.set(role, text);
        Ok(Some(role))
    }

    pub fn paths(&self) -> &SourcePaths {
        &self.paths
    }

    pub fn panels(&self) -> &Panels {
        &self.panels
    }
}

impl SourceTexts for FileSources {
    fn structure_text(&self) -> &str {
        self.panels.structure_text()
    }
    fn style_text(&self) -> &str {
        self.panels.style_text()
    }
    fn behavior_text(&self) -> &str {
        self.panels.behavior_text()
    }
}

fn read_source(role: SourceRole, path: &Path) -> Result<String, SourceError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(source) => Err(SourceError::Io {
            role,
            path: path.to_path_buf(),
            source,
        }),
    }
}
