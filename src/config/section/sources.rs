//! `[sources]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [sources]
//! structure = "index.html"
//! style = "style.css"
//! behavior = "script.js"
//! ```
//!
//! Paths are relative to the project root (the directory holding `livepen.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;
use crate::preview::{SourcePaths, SourceRole};
use crate::utils::path::normalize_path;

/// Paths of the three source files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Markup placed into the document body.
    pub structure: PathBuf,
    /// Stylesheet placed into the embedded `<style>` block.
    pub style: PathBuf,
    /// Script placed into the trailing `<script>` block.
    pub behavior: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            structure: SourceRole::Structure.default_file().into(),
            style: SourceRole::Style.default_file().into(),
            behavior: SourceRole::Behavior.default_file().into(),
        }
    }
}

impl SourcesConfig {
    pub(crate) fn normalize(&mut self, root: &Path) {
        self.structure = normalize_path(&root.join(&self.structure));
        self.style = normalize_path(&root.join(&self.style));
        self.behavior = normalize_path(&root.join(&self.behavior));
    }

    pub fn paths(&self) -> SourcePaths {
        SourcePaths {
            structure: self.structure.clone(),
            style: self.style.clone(),
            behavior: self.behavior.clone(),
        }
    }

    pub(crate) fn validate(&self, diag: &mut ConfigDiagnostics) {
        let paths = [&self.structure, &self.style, &self.behavior];
        let distinct = paths[0] != paths[1] && paths[1] != paths[2] && paths[0] != paths[2];
        if !distinct {
            diag.error_with_hint(
                "sources",
                "structure, style and behavior must be different files",
                "e.g. index.html, style.css and script.js",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_sources_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.sources.structure, PathBuf::from("index.html"));
        assert_eq!(config.sources.style, PathBuf::from("style.css"));
        assert_eq!(config.sources.behavior, PathBuf::from("script.js"));
    }

    #[test]
    fn test_sources_override() {
        let config =
            test_parse_config("[sources]\nstructure = \"src/page.html\"\nbehavior = \"app.js\"");
        assert_eq!(config.sources.structure, PathBuf::from("src/page.html"));
        assert_eq!(config.sources.style, PathBuf::from("style.css"));
        assert_eq!(config.sources.behavior, PathBuf::from("app.js"));
    }
}
