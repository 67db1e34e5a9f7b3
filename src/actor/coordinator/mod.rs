//! Actor Coordinator - Wires up the Live Preview Actor System
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates communication channels
//! - Wires up actors
//! - Runs them concurrently
//!
//! The preview channel is created up front so the HTTP server can hold a
//! sender for its `run` trigger before the actors start.

mod runtime;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::Receiver;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::fs::{FsActor, WatchTargets};
use super::messages::{PreviewMsg, WsMsg};
use super::preview::PreviewActor;
use super::ws::WsActor;
use crate::config::ProjectConfig;
use crate::preview::DocumentSlot;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    config: Arc<ProjectConfig>,
    slot: Arc<DocumentSlot>,
    preview_tx: UnboundedSender<PreviewMsg>,
    preview_rx: UnboundedReceiver<PreviewMsg>,
    ws_port: Option<u16>,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    /// Create for `config`, publishing documents into `slot`.
    pub fn new(config: Arc<ProjectConfig>, slot: Arc<DocumentSlot>) -> Self {
        let (preview_tx, preview_rx) = mpsc::unbounded_channel();
        Self {
            config,
            slot,
            preview_tx,
            preview_rx,
            ws_port: None,
            shutdown_rx: None,
        }
    }

    /// Sender for explicit `run` requests.
    pub fn preview_sender(&self) -> UnboundedSender<PreviewMsg> {
        self.preview_tx.clone()
    }

    /// Set WebSocket port.
    pub fn with_ws_port(mut self, port: u16) -> Self {
        self.ws_port = Some(port);
        self
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(self) -> Result<()> {
        let (ws_tx, ws_rx) = mpsc::unbounded_channel::<WsMsg>();

        if let Some(port) = self.ws_port {
            match crate::reload::server::start_ws_server(
                self.config.serve.interface,
                port,
                ws_tx.clone(),
            ) {
                Ok(actual_port) => crate::cli::serve::set_actual_ws_port(actual_port),
                Err(e) => crate::log!("ws"; "websocket server failed: {}", e),
            }
        }

        // Watcher first: edits made while the first refresh runs still arrive
        let fs_actor = if self.config.serve.watch {
            let targets = WatchTargets::from_config(&self.config);
            let debounce = Duration::from_millis(self.config.serve.debounce_ms);
            match FsActor::new(targets, self.preview_tx.clone(), debounce) {
                Ok(actor) => Some(actor),
                Err(e) => {
                    crate::log!("watch"; "watcher failed, live refresh disabled: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let preview_actor = PreviewActor::new(
            self.preview_rx,
            ws_tx.clone(),
            Arc::clone(&self.slot),
            &self.config,
        );
        let ws_actor = WsActor::new(ws_rx, self.slot);

        crate::debug!("actor"; "start");
        runtime::run_actors(
            fs_actor,
            preview_actor,
            ws_actor,
            self.preview_tx,
            ws_tx,
            self.shutdown_rx,
        )
        .await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
