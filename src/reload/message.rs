//! Hot Reload Message Protocol
//!
//! JSON messages sent from the preview server to browser clients.
//!
//! # Message Types
//!
//! - `reload`: the document was replaced, reload the page
//! - `connected`: greeting with the server's current revision
//! - `error`: a source could not be read, show an overlay
//! - `clear_error`: remove the overlay

use serde::{Deserialize, Serialize};

/// Hot reload message sent over WebSocket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HotReloadMessage {
    /// Full page reload; the previous document and its scripts are discarded
    Reload {
        /// Revision of the document now being served
        revision: u64,
    },

    /// Connection established
    Connected {
        /// Server version for compatibility check
        version: String,
        /// Current document revision (0 = nothing published yet)
        revision: u64,
    },

    /// Source read error (display overlay, no reload)
    Error {
        /// Source file path
        path: String,
        /// Error message
        error: String,
    },

    /// Clear error overlay
    #[serde(rename = "clear_error")]
    ClearError,
}

impl HotReloadMessage {
    pub fn reload(revision: u64) -> Self {
        Self::Reload { revision }
    }

    /// Create a connected message
    pub fn connected(revision: u64) -> Self {
        Self::Connected {
            version: env!("CARGO_PKG_VERSION").to_string(),
            revision,
        }
    }

    pub fn error(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Error {
            path: path.into(),
            error: error.into(),
        }
    }

    pub fn clear_error() -> Self {
        Self::ClearError
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> String {
        // Plain enum of strings and integers; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn as_value(msg: &HotReloadMessage) -> Value {
        serde_json::from_str(&msg.to_json()).unwrap()
    }

    #[test]
    fn test_reload_message() {
        assert_eq!(
            as_value(&HotReloadMessage::reload(3)),
            json!({"type": "reload", "revision": 3})
        );
    }

    #[test]
    fn test_connected_message() {
        let value = as_value(&HotReloadMessage::connected(5));
        assert_eq!(value["type"], "connected");
        assert_eq!(value["revision"], 5);
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            as_value(&HotReloadMessage::error("style.css", "permission denied")),
            json!({"type": "error", "path": "style.css", "error": "permission denied"})
        );
    }

    #[test]
    fn test_clear_error_message() {
        assert_eq!(
            as_value(&HotReloadMessage::clear_error()),
            json!({"type": "clear_error"})
        );
    }

    #[test]
    fn test_deserialize() {
        let msg: HotReloadMessage = serde_json::from_str(r#"{"type":"reload","revision":9}"#).unwrap();
        assert_eq!(msg, HotReloadMessage::reload(9));
    }
}
