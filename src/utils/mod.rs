//! Shared helpers.
//!
//! - `hash` - content hashing for change detection
//! - `html` - HTML entity escaping for skeleton values
//! - `mime` - Content-Type lookup for the preview server
//! - `path` - filesystem path normalization

pub mod hash;
pub mod html;
pub mod mime;
pub mod path;
