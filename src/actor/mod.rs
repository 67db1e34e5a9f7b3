//! Actor System for Live Preview
//!
//! Message-passing concurrency for serve mode:
//!
//! ```text
//! FsActor --> PreviewActor --> WsActor
//! (watch)      (refresh)     (broadcast)
//!                 ^
//!      HTTP run --+
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher with noise filtering
//! - `preview` - Owns the assembler and the browser surface
//! - `ws` - WebSocket clients and broadcast
//! - `coordinator` - Wires up and runs actors

pub mod coordinator;
pub mod fs;
pub mod messages;
pub mod preview;
pub mod ws;

pub use coordinator::Coordinator;
