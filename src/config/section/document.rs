//! `[document]` section configuration.
//!
//! Shapes the fixed document skeleton the three sources are placed into.
//!
//! # Example
//!
//! ```toml
//! [document]
//! title = "Playground"
//! lang = "en"
//! charset = "utf-8"
//! viewport = true
//! scripts = ["https://code.jquery.com/jquery-3.7.1.min.js"]
//! stylesheets = []
//! ```
//!
//! `scripts` are loaded in the header, before the behavior block runs.

use serde::{Deserialize, Serialize};

use crate::config::ConfigDiagnostics;

/// Document skeleton settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub title: String,
    pub lang: String,
    pub charset: String,
    /// Emit a responsive viewport meta tag.
    pub viewport: bool,
    /// External script URLs, in load order.
    pub scripts: Vec<String>,
    /// External stylesheet URLs, in load order.
    pub stylesheets: Vec<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: "livepen".to_string(),
            lang: "en".to_string(),
            charset: "utf-8".to_string(),
            viewport: true,
            scripts: Vec::new(),
            stylesheets: Vec::new(),
        }
    }
}

impl DocumentConfig {
    pub(crate) fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.charset.trim().is_empty() {
            diag.error("document.charset", "charset must not be empty");
        }
        for (i, url) in self.scripts.iter().enumerate() {
            if url.trim().is_empty() {
                diag.error(
                    "document.scripts",
                    format!("entry {} is empty", i + 1),
                );
            }
        }
        for (i, url) in self.stylesheets.iter().enumerate() {
            if url.trim().is_empty() {
                diag.error(
                    "document.stylesheets",
                    format!("entry {} is empty", i + 1),
                );
            }
        }
    }
}
