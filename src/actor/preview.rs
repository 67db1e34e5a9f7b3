//! Preview Actor
//!
//! Owns the `PreviewAssembler` for serve mode. Every message it handles ends
//! in at most one `refresh()`, and messages are handled strictly in order, so
//! the browser always ends up showing the document built from the last
//! notification.
//!
//! The browser side of the surface is `LiveSurface`: it swaps the document
//! slot the HTTP server reads from, then tells connected clients to reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use super::messages::{PreviewMsg, WsMsg};
use crate::config::{ProjectConfig, cfg, reload_config};
use crate::logger::{status_error, status_success, status_warning};
use crate::preview::{
    CompositeDocument, DocumentSlot, FileSources, PreviewAssembler, RenderingSurface, Skeleton,
    SourceError, SurfaceError,
};

// =============================================================================
// LiveSurface
// =============================================================================

/// Browser-backed rendering surface.
///
/// Publishing is a single pointer swap, so an HTTP reader sees either the
/// previous document or the new one. The reload that follows makes every open
/// page drop its old document, scripts and timers included.
pub struct LiveSurface {
    slot: Arc<DocumentSlot>,
    ws_tx: UnboundedSender<WsMsg>,
}

impl LiveSurface {
    pub fn new(slot: Arc<DocumentSlot>, ws_tx: UnboundedSender<WsMsg>) -> Self {
        Self { slot, ws_tx }
    }
}

impl RenderingSurface for LiveSurface {
    fn name(&self) -> &str {
        "browser"
    }

    fn replace(&mut self, document: &CompositeDocument) -> Result<(), SurfaceError> {
        let revision = self.slot.publish(document.clone());
        // With no WsActor the slot is still updated; pages pick it up on load
        if self.ws_tx.send(WsMsg::Reload { revision }).is_err() {
            crate::debug!("preview"; "no reload channel, revision {} published silently", revision);
        }
        Ok(())
    }
}

// =============================================================================
// PreviewActor
// =============================================================================

/// A failure shown as the browser overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Overlay {
    path: String,
    error: String,
}

/// Preview Actor - re-reads sources and refreshes the browser surface
pub struct PreviewActor {
    rx: UnboundedReceiver<PreviewMsg>,
    ws_tx: UnboundedSender<WsMsg>,
    assembler: PreviewAssembler<FileSources>,
    config_path: PathBuf,
    root: PathBuf,
    /// A source could not be read; panels may lag behind the files until
    /// the next full load succeeds.
    source_error: Option<Overlay>,
    /// `livepen.toml` failed to load; the previous config is still in use.
    config_error: Option<Overlay>,
    /// What the browser overlay currently shows
    shown: Option<Overlay>,
}

impl PreviewActor {
    pub fn new(
        rx: UnboundedReceiver<PreviewMsg>,
        ws_tx: UnboundedSender<WsMsg>,
        slot: Arc<DocumentSlot>,
        config: &ProjectConfig,
    ) -> Self {
        let mut assembler = PreviewAssembler::new(
            FileSources::new(config.sources.paths()),
            Skeleton::from_config(&config.document),
        );
        assembler.attach_surface(Box::new(LiveSurface::new(slot, ws_tx.clone())));

        Self {
            rx,
            ws_tx,
            assembler,
            config_path: config.config_path.clone(),
            root: config.root().to_path_buf(),
            source_error: None,
            config_error: None,
            shown: None,
        }
    }

    /// Run the actor event loop. Starts with a full load and refresh.
    pub async fn run(mut self) {
        self.run_all();

        while let Some(msg) = self.rx.recv().await {
            match msg {
                PreviewMsg::Changed(paths) => self.on_changed(&paths),
                PreviewMsg::Run => {
                    crate::debug!("preview"; "run requested");
                    self.run_all();
                }
                PreviewMsg::Shutdown => {
                    crate::debug!("preview"; "shutting down");
                    break;
                }
            }
        }
    }

    /// Re-read all three sources, then refresh.
    fn run_all(&mut self) {
        if self.load_all() {
            self.refresh("all sources");
        }
        self.sync_overlay();
    }

    /// Re-read changed sources (and the config), then refresh once.
    ///
    /// Every path in the batch is read even if an earlier one fails, so no
    /// edit is lost to an unrelated read error.
    fn on_changed(&mut self, paths: &[PathBuf]) {
        let mut changed = Vec::new();
        let mut failed = None;

        for path in paths {
            if *path == self.config_path {
                if self.on_config_changed() {
                    changed.push(self.display_path(path));
                }
                continue;
            }

            match self.assembler.sources_mut().reload(path) {
                Ok(Some(role)) => {
                    crate::debug!("preview"; "reloaded {} source", role);
                    changed.push(self.display_path(path));
                }
                Ok(None) => {}
                Err(e) => {
                    failed.get_or_insert(e);
                }
            }
        }

        if let Some(e) = failed {
            self.report_source_error(e);
        } else if !changed.is_empty() {
            // a failed full load may have left other panels behind
            if self.source_error.is_none() || self.load_all() {
                self.refresh(&changed.join(", "));
            }
        }
        self.sync_overlay();
    }

    /// Returns whether the panels now match the files.
    fn load_all(&mut self) -> bool {
        match self.assembler.sources_mut().load_all() {
            Ok(()) => {
                self.source_error = None;
                true
            }
            Err(e) => {
                self.report_source_error(e);
                false
            }
        }
    }

    /// Apply an edited `livepen.toml`. Returns whether anything changed.
    fn on_config_changed(&mut self) -> bool {
        match reload_config() {
            Ok(reloaded) => {
                self.config_error = None;
                if !reloaded {
                    return false;
                }
                let config = cfg();
                if config.sources.paths() != *self.assembler.sources().paths() {
                    status_warning("source paths changed, restart `livepen serve` to apply");
                }
                self.assembler
                    .set_skeleton(Skeleton::from_config(&config.document));
                true
            }
            Err(e) => {
                let overlay = Overlay {
                    path: self.display_path(&self.config_path),
                    error: format!("{e:#}"),
                };
                status_error(&format!("error in {}", overlay.path), &overlay.error);
                self.config_error = Some(overlay);
                false
            }
        }
    }

    fn refresh(&mut self, what: &str) {
        match self.assembler.refresh() {
            Ok(()) => match &self.config_error {
                Some(config) => status_error(
                    &format!("refreshed: {what}, {} not applied", config.path),
                    &config.error,
                ),
                None => status_success(&format!("refreshed: {what}")),
            },
            Err(e) => status_error("refresh failed", &format!("{:#}", anyhow::Error::new(e))),
        }
    }

    fn report_source_error(&mut self, error: SourceError) {
        let overlay = Overlay {
            path: self.display_path(error.path()),
            error: format!("{:#}", anyhow::Error::new(error)),
        };
        status_error(&format!("error in {}", overlay.path), &overlay.error);
        self.source_error = Some(overlay);
    }

    /// Bring the browser overlay in line with the outstanding errors.
    /// Source errors take precedence; the overlay clears once both are gone.
    fn sync_overlay(&mut self) {
        let wanted = self.source_error.as_ref().or(self.config_error.as_ref()).cloned();
        if wanted == self.shown {
            return;
        }
        let msg = match &wanted {
            Some(overlay) => WsMsg::Error {
                path: overlay.path.clone(),
                error: overlay.error.clone(),
            },
            None => WsMsg::ClearError,
        };
        let _ = self.ws_tx.send(msg);
        self.shown = wanted;
    }

    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    #[cfg(test)]
    fn role_text(&self, role: crate::preview::SourceRole) -> &str {
        self.assembler.sources().panels().get(role)
    }
}
