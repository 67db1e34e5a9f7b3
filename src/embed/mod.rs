//! Embedded static resources.
//!
//! - `serve` - Dev server resources (reload client, loading page)
//! - `init` - Starter files written by `livepen init`
//!
//! Text is compiled in with `include_str!`. Placeholders look like
//! `__NAME__` and are filled when the resource is rendered.

/// Replace each `(placeholder, value)` pair in `text`.
fn fill(text: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(text.to_owned(), |acc, (key, value)| acc.replace(key, value))
}

pub mod serve {
    /// URL the hot reload client is served from.
    pub const HOTRELOAD_URL: &str = "/__livepen/hotreload.js";

    const HOTRELOAD_JS: &str = include_str!("serve/hotreload.js");

    /// Placeholder served before the first document is published.
    pub const LOADING_HTML: &str = include_str!("serve/loading.html");

    /// Reload client connecting to the WebSocket port the server bound.
    pub fn hotreload_js(ws_port: u16) -> String {
        let port = ws_port.to_string();
        super::fill(HOTRELOAD_JS, &[("__LIVEPEN_WS_PORT__", port.as_str())])
    }

    /// `<script>` tag loading the client, stamped with the revision the page
    /// was rendered from.
    pub fn hotreload_tag(revision: u64) -> String {
        format!(r#"<script src="{HOTRELOAD_URL}" data-revision="{revision}"></script>"#)
    }
}

pub mod init {
    const CONFIG_TOML: &str = include_str!("init/livepen.toml");

    /// Starter structure source.
    pub const INDEX_HTML: &str = include_str!("init/index.html");

    /// Starter style source.
    pub const STYLE_CSS: &str = include_str!("init/style.css");

    /// Starter behavior source.
    pub const SCRIPT_JS: &str = include_str!("init/script.js");

    /// Starter `livepen.toml` with `title` as the document title.
    pub fn config_toml(title: &str) -> String {
        let title = toml::Value::String(title.to_string()).to_string();
        super::fill(
            CONFIG_TOML,
            &[
                ("__TITLE__", title.as_str()),
                ("__VERSION__", env!("CARGO_PKG_VERSION")),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill() {
        assert_eq!(fill("a __X__ b __X__", &[("__X__", "1")]), "a 1 b 1");
    }

    #[test]
    fn test_hotreload_js_port() {
        let rendered = serve::hotreload_js(35729);
        assert!(rendered.contains("35729"));
        assert!(!rendered.contains("__LIVEPEN_WS_PORT__"));
    }

    #[test]
    fn test_hotreload_tag() {
        let tag = serve::hotreload_tag(7);
        assert!(tag.contains(serve::HOTRELOAD_URL));
        assert!(tag.contains("data-revision=\"7\""));
    }

    #[test]
    fn test_init_config_renders_valid_toml() {
        let rendered = init::config_toml("My \"pen\"");
        assert!(!rendered.contains("__TITLE__"));

        let parsed = crate::config::test_parse_config(&rendered);
        assert_eq!(parsed.document.title, "My \"pen\"");
    }

    #[test]
    fn test_init_config_control_characters_stay_valid() {
        let title = "line\nbreak\ttab \\ \u{7}bell";
        let parsed = crate::config::test_parse_config(&init::config_toml(title));
        assert_eq!(parsed.document.title, title);
    }

    #[test]
    fn test_init_sources_not_empty() {
        assert!(init::INDEX_HTML.contains("<h1"));
        assert!(!init::STYLE_CSS.trim().is_empty());
        assert!(!init::SCRIPT_JS.trim().is_empty());
    }
}
