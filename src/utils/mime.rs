//! Content-Type lookup for files served next to the preview.

use std::path::Path;

/// Content types the server names directly.
pub mod types {
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css; charset=utf-8";
    pub const JAVASCRIPT: &str = "text/javascript; charset=utf-8";
}

/// Fallback for unknown extensions.
const BINARY: &str = "application/octet-stream";

/// What a hand-written page usually pulls in: markup, style, script, data,
/// images, fonts.
const BY_EXTENSION: &[(&str, &str)] = &[
    ("html", types::HTML),
    ("htm", types::HTML),
    ("css", types::CSS),
    ("js", types::JAVASCRIPT),
    ("mjs", types::JAVASCRIPT),
    ("txt", types::PLAIN),
    ("json", "application/json"),
    ("map", "application/json"),
    ("wasm", "application/wasm"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("ico", "image/x-icon"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("ttf", "font/ttf"),
    ("otf", "font/otf"),
];

/// Content type for `path`, by extension (case-insensitive).
pub fn from_path(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| {
            BY_EXTENSION
                .iter()
                .find(|(known, _)| ext.eq_ignore_ascii_case(known))
        })
        .map_or(BINARY, |&(_, mime)| mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path() {
        assert_eq!(from_path(Path::new("index.html")), types::HTML);
        assert_eq!(from_path(Path::new("style.css")), types::CSS);
        assert_eq!(from_path(Path::new("app.mjs")), types::JAVASCRIPT);
        assert_eq!(from_path(Path::new("logo.PNG")), "image/png");
        assert_eq!(from_path(Path::new("font.woff2")), "font/woff2");
    }

    #[test]
    fn test_unknown_is_binary() {
        assert_eq!(from_path(Path::new("unknown.xyz")), BINARY);
        assert_eq!(from_path(Path::new("Makefile")), BINARY);
    }
}
