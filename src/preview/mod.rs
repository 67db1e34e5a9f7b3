//! Live preview assembly.
//!
//! Turns three independent text sources into one renderable document and
//! commits it into a replaceable rendering surface.
//!
//! ```text
//! SourceTexts --snapshot--> compose(Skeleton) --> CompositeDocument --replace--> RenderingSurface
//!  (3 panels)   (read once)    (pure, verbatim)                       (clear + full write)
//! ```
//!
//! # Module Structure
//!
//! - `sources` - Source roles, editor panels, file-backed panels, snapshots
//! - `skeleton` - The fixed document shape (metadata header, library tags)
//! - `document` - `compose()` and the `CompositeDocument` it produces
//! - `surface` - `RenderingSurface` trait with memory and file sinks
//! - `slot` - Lock-free published-document slot read by the HTTP server
//! - `assembler` - `PreviewAssembler`, the `refresh()` operation
//!
//! # Re-render contract
//!
//! Every refresh replaces the whole surface. Whatever ran inside the previous
//! document (scripts, timers, event handlers) is torn down with it and the new
//! document starts from scratch. Nothing is preserved or migrated across
//! refreshes, and requests are never coalesced: each call is a full,
//! independent refresh, so rapid triggers resolve to "last write wins".

mod assembler;
mod document;
mod skeleton;
mod slot;
mod sources;
mod surface;

#[cfg(test)]
mod tests;

pub use assembler::{PreviewAssembler, RefreshError};
pub use document::{CompositeDocument, Section, compose};
pub use skeleton::Skeleton;
pub use slot::{DocumentSlot, Published};
pub use sources::{FileSources, Panels, Snapshot, SourceError, SourcePaths, SourceRole, SourceTexts};
pub use surface::{FileSurface, MemorySurface, RenderingSurface, SurfaceError};
