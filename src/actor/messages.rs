//! Actor Message Definitions
//!
//! ```text
//! FsActor --Changed--> PreviewActor --Reload--> WsActor
//! ```
//!
//! Both channels are unbounded: the HTTP `run` trigger and the browser
//! surface send from plain threads without awaiting.

use std::path::PathBuf;

// =============================================================================
// PreviewActor Messages
// =============================================================================

/// Messages to Preview Actor
#[derive(Debug)]
pub enum PreviewMsg {
    /// Files changed on disk; each message is one refresh
    Changed(Vec<PathBuf>),
    /// Explicit run trigger: re-read every source, then refresh
    Run,
    /// Shutdown
    Shutdown,
}

// =============================================================================
// WsActor Messages
// =============================================================================

/// Messages to WebSocket Actor
#[derive(Debug)]
pub enum WsMsg {
    /// A new document was published under `revision`
    Reload { revision: u64 },
    /// Source read error (display overlay, no reload)
    Error { path: String, error: String },
    /// Clear error overlay (refresh succeeded after error)
    ClearError,
    /// Add client
    AddClient(std::net::TcpStream),
    /// Shutdown
    Shutdown,
}
