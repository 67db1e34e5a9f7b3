//! Reload Module
//!
//! WebSocket-based live reload for the preview server.
//!
//! ```text
//! FsActor -> PreviewActor -> WsActor -> Browser
//!  (watch)     (refresh)    (broadcast)
//! ```
//!
//! - `message` - Hot reload message types
//! - `server` - WebSocket acceptor handing clients to WsActor

pub mod message;
pub mod server;
