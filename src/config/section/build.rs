//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "preview.html"     # Written by `livepen build`
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, SourcesConfig};
use crate::utils::path::normalize_path;

/// One-shot build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// File the composite document is written to.
    pub output: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("preview.html"),
        }
    }
}

impl BuildConfig {
    pub(crate) fn normalize(&mut self, root: &Path) {
        self.output = normalize_path(&root.join(&self.output));
    }

    pub(crate) fn validate(&self, sources: &SourcesConfig, diag: &mut ConfigDiagnostics) {
        if sources.paths().role_of(&self.output).is_some() {
            diag.error_with_hint(
                "build.output",
                "output would overwrite a source file",
                "choose a different file, e.g. preview.html",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;
    use std::path::PathBuf;

    #[test]
    fn test_build_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.build.output, PathBuf::from("preview.html"));
    }

    #[test]
    fn test_build_output() {
        let config = test_parse_config("[build]\noutput = \"dist/index.html\"");
        assert_eq!(config.build.output, PathBuf::from("dist/index.html"));
    }
}
