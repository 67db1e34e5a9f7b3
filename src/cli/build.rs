//! One-shot build: compose the sources once and write the result to a file.

use anyhow::{Context, Result};

use crate::{
    config::ProjectConfig,
    log,
    preview::{FileSources, FileSurface, PreviewAssembler, Skeleton},
};

/// Refresh once into a `FileSurface` at `[build] output`.
pub fn build_preview(config: &ProjectConfig) -> Result<()> {
    let sources = FileSources::open(config.sources.paths()).context("failed to read sources")?;

    let mut assembler = PreviewAssembler::new(sources, Skeleton::from_config(&config.document));
    assembler.attach_surface(Box::new(FileSurface::new(&config.build.output)));
    assembler.refresh()?;

    crate::debug_do! {
        for (role, path) in config.sources.paths().iter() {
            crate::debug!("build"; "{}: {}", role, config.relative_to_root(path).display());
        }
    }
    log!("build"; "wrote {}", config.relative_to_root(&config.build.output).display());
    Ok(())
}
