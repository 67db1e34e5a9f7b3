//! The Preview Assembler.

use thiserror::Error;

use super::document::{CompositeDocument, compose};
use super::skeleton::Skeleton;
use super::sources::SourceTexts;
use super::surface::{RenderingSurface, SurfaceError};

/// Errors from [`PreviewAssembler::refresh`].
///
/// Content is never validated, so malformed markup, style or script cannot
/// produce an error here.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// No surface is attached; attach one before the first refresh.
    #[error("no preview surface attached")]
    SurfaceUnavailable,

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Reads three source texts, composes them and commits the result.
///
/// Holds no state between calls besides the sources handle, the skeleton and
/// the attached surface. Each `refresh()` is a complete, independent,
/// synchronous operation: read all three texts once, compose, replace the
/// surface.
pub struct PreviewAssembler<S> {
    sources: S,
    skeleton: Skeleton,
    surface: Option<Box<dyn RenderingSurface>>,
}

impl<S: SourceTexts> PreviewAssembler<S> {
    pub fn new(sources: S, skeleton: Skeleton) -> Self {
        Self {
            sources,
            skeleton,
            surface: None,
        }
    }

    /// Bind the surface refreshes write into.
    ///
    /// Returns the previously attached surface, if any. Creation and teardown
    /// of the surface stay with the caller.
    pub fn attach_surface(
        &mut self,
        surface: Box<dyn RenderingSurface>,
    ) -> Option<Box<dyn RenderingSurface>> {
        self.surface.replace(surface)
    }

    pub fn detach_surface(&mut self) -> Option<Box<dyn RenderingSurface>> {
        self.surface.take()
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn sources(&self) -> &S {
        &self.sources
    }

    pub fn sources_mut(&mut self) -> &mut S {
        &mut self.sources
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn set_skeleton(&mut self, skeleton: Skeleton) {
        self.skeleton = skeleton;
    }

    /// Compose the current sources without touching the surface.
    pub fn compose(&self) -> CompositeDocument {
        compose(&self.sources.snapshot(), &self.skeleton)
    }

    /// Rebuild the document from the current sources and replace the surface.
    ///
    /// The three texts are read exactly once, before anything is written.
    /// The previous surface content, and everything running inside it, is
    /// discarded.
    pub fn refresh(&mut self) -> Result<(), RefreshError> {
        let Some(surface) = self.surface.as_mut() else {
            return Err(RefreshError::SurfaceUnavailable);
        };

        let document = compose(&self.sources.snapshot(), &self.skeleton);
        surface.replace(&document)?;

        crate::debug!("preview"; "refreshed {} ({} bytes)", surface.name(), document.len());
        Ok(())
    }
}
