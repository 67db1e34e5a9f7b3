//! The fixed document shape around the three source texts.

use std::fmt::Write;

use crate::config::DocumentConfig;
use crate::utils::html::escape;

/// Metadata header of the composite document.
///
/// Only these configured values are escaped. The source texts placed into the
/// document never pass through here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    pub lang: String,
    pub title: String,
    pub charset: String,
    pub viewport: bool,
    /// External script URLs (e.g. a DOM helper library), in load order.
    pub scripts: Vec<String>,
    /// External stylesheet URLs, in load order.
    pub stylesheets: Vec<String>,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            title: "livepen".to_string(),
            charset: "utf-8".to_string(),
            viewport: true,
            scripts: Vec::new(),
            stylesheets: Vec::new(),
        }
    }
}

impl Skeleton {
    pub fn from_config(config: &DocumentConfig) -> Self {
        Self {
            lang: config.lang.clone(),
            title: config.title.clone(),
            charset: config.charset.clone(),
            viewport: config.viewport,
            scripts: config.scripts.clone(),
            stylesheets: config.stylesheets.clone(),
        }
    }

    /// Write everything up to (not including) the embedded style block.
    pub(super) fn write_head(&self, out: &mut String) {
        out.push_str("<!DOCTYPE html>\n");
        let _ = writeln!(out, "<html lang=\"{}\">", escape(&self.lang));
        out.push_str("<head>\n");
        let _ = writeln!(out, "<meta charset=\"{}\">", escape(&self.charset));
        if self.viewport {
            out.push_str(
                "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
            );
        }
        let _ = writeln!(out, "<title>{}</title>", escape(&self.title));
        for href in &self.stylesheets {
            let _ = writeln!(out, "<link rel=\"stylesheet\" href=\"{}\">", escape(href));
        }
        for src in &self.scripts {
            let _ = writeln!(out, "<script src=\"{}\"></script>", escape(src));
        }
    }

    /// Rough size of the header, for buffer pre-allocation.
    pub(super) fn estimated_len(&self) -> usize {
        let libraries: usize = self
            .scripts
            .iter()
            .chain(&self.stylesheets)
            .map(|url| url.len() + 48)
            .sum();
        256 + self.title.len() + libraries
    }
}
