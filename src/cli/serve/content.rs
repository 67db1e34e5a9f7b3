//! Hot reload client injection.

use crate::embed::serve::hotreload_tag;

/// Insert the reload client before the last `</body>`, or append it.
///
/// Only the served bytes change; the published document stays as composed.
pub fn inject_hotreload_script(content: &[u8], revision: u64) -> Vec<u8> {
    let script = hotreload_tag(revision);
    let script_bytes = script.as_bytes();

    const PATTERN: &[u8] = b"</body>";

    let pos = content
        .windows(PATTERN.len())
        .rposition(|w| w.eq_ignore_ascii_case(PATTERN))
        .unwrap_or(content.len());

    let mut result = Vec::with_capacity(content.len() + script_bytes.len());
    result.extend_from_slice(&content[..pos]);
    result.extend_from_slice(script_bytes);
    result.extend_from_slice(&content[pos..]);
    result
}
