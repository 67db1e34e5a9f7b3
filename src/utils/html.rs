//! HTML escaping for values the skeleton writes itself (title, lang, URLs).
//!
//! Source texts never pass through here.

use std::borrow::Cow;

/// Escape `& < > " '` so `s` is safe as text and inside a quoted attribute.
///
/// Borrows when nothing needs escaping.
pub fn escape(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(['&', '<', '>', '"', '\'']) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 16);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<b>\"x\" & 'y'</b>"),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
        assert_eq!(escape("a\"onload=\"x"), "a&quot;onload=&quot;x");
    }

    #[test]
    fn test_escape_borrows_clean_input() {
        assert!(matches!(escape("plain title"), Cow::Borrowed(_)));
        assert!(matches!(escape("https://cdn.example/lib.js"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_keeps_prefix() {
        assert_eq!(escape("Tom & Jerry"), "Tom &amp; Jerry");
    }
}
