//! Composite document construction.

use std::fmt;
use std::ops::Range;

use super::skeleton::Skeleton;
use super::sources::{Snapshot, SourceRole};

/// A section of the composite document holding one source text verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Embedded `<style>` block (Style text)
    Style,
    /// Document body (Structure text)
    Body,
    /// Trailing `<script>` block (Behavior text)
    Behavior,
}

impl Section {
    pub const fn for_role(role: SourceRole) -> Self {
        match role {
            SourceRole::Structure => Self::Body,
            SourceRole::Style => Self::Style,
            SourceRole::Behavior => Self::Behavior,
        }
    }
}

/// One full renderable document, built fresh on every refresh.
///
/// Remembers where each source text landed so callers can read a section back
/// without parsing the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeDocument {
    text: String,
    style: Range<usize>,
    body: Range<usize>,
    behavior: Range<usize>,
}

impl CompositeDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Exact text placed into `section`.
    pub fn section(&self, section: Section) -> &str {
        let range = match section {
            Section::Style => &self.style,
            Section::Body => &self.body,
            Section::Behavior => &self.behavior,
        };
        &self.text[range.clone()]
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for CompositeDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for CompositeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Compose three source texts into one document.
///
/// Layout, in order: metadata header, `<style>` with the Style text, `<body>`
/// with the Structure text, trailing `<script>` with the Behavior text.
/// Concatenation is textual: no escaping, no validation, no re-encoding.
/// Malformed input is passed through and left for the browser to deal with.
pub fn compose(snapshot: &Snapshot, skeleton: &Skeleton) -> CompositeDocument {
    let mut text = String::with_capacity(skeleton.estimated_len() + snapshot.len());

    skeleton.write_head(&mut text);

    text.push_str("<style>");
    let style = push_section(&mut text, &snapshot.style);
    text.push_str("</style>\n</head>\n<body>\n");

    let body = push_section(&mut text, &snapshot.structure);

    text.push_str("\n<script>");
    let behavior = push_section(&mut text, &snapshot.behavior);
    text.push_str("</script>\n</body>\n</html>\n");

    CompositeDocument {
        text,
        style,
        body,
        behavior,
    }
}

#[inline]
fn push_section(out: &mut String, content: &str) -> Range<usize> {
    let start = out.len();
    out.push_str(content);
    start..out.len()
}
