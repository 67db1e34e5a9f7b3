//! Development server with live preview.
//!
//! ```text
//! GET  /, /index.html          current composite document (+ reload client)
//! GET  /__livepen/hotreload.js reload client
//! POST /__livepen/run          re-read all sources and refresh
//! GET  anything else           static file under the project root
//! ```

mod content;
mod lifecycle;
mod path;
mod response;

#[cfg(test)]
mod tests;

use crate::{
    actor::{Coordinator, messages::PreviewMsg},
    config::{ProjectConfig, cfg},
    embed::serve::HOTRELOAD_URL,
    log,
    preview::DocumentSlot,
};
use anyhow::Result;
use crossbeam::channel;
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};
use tiny_http::{Method, Request, Server};
use tokio::sync::mpsc::UnboundedSender;

/// Default WebSocket port for hot reload
pub const DEFAULT_WS_PORT: u16 = 35729;

/// Explicit refresh trigger.
pub const RUN_URL: &str = "/__livepen/run";

/// Actual WebSocket port (may differ from DEFAULT_WS_PORT if port was in use)
/// Updated by coordinator after WebSocket server binds successfully
static ACTUAL_WS_PORT: AtomicU16 = AtomicU16::new(DEFAULT_WS_PORT);

/// Update the actual WebSocket port (called by coordinator after binding)
pub fn set_actual_ws_port(port: u16) {
    ACTUAL_WS_PORT.store(port, Ordering::Relaxed);
}

/// Get the actual WebSocket port
fn get_actual_ws_port() -> u16 {
    ACTUAL_WS_PORT.load(Ordering::Relaxed)
}

/// State shared by request handlers.
#[derive(Clone)]
struct ServeContext {
    config: Arc<ProjectConfig>,
    slot: Arc<DocumentSlot>,
    preview_tx: UnboundedSender<PreviewMsg>,
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server() -> Result<BoundServer> {
    let config = cfg();
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Start the actors and the request loop (blocking).
    pub fn run(self) -> Result<()> {
        let config = cfg();
        let slot = Arc::new(DocumentSlot::new());

        let coordinator = Coordinator::new(Arc::clone(&config), Arc::clone(&slot))
            .with_ws_port(DEFAULT_WS_PORT)
            .with_shutdown_signal(self.shutdown_rx);
        let ctx = ServeContext {
            config,
            slot,
            preview_tx: coordinator.preview_sender(),
        };

        let actor_handle = lifecycle::spawn_actors(coordinator);
        run_request_loop(&self.server, &ctx)?;
        lifecycle::wait_for_shutdown(actor_handle);
        Ok(())
    }
}

fn run_request_loop(server: &Server, ctx: &ServeContext) -> Result<()> {
    // Static files never wait on a refresh, but keep slow clients off the accept loop
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build()?;

    for request in server.incoming_requests() {
        let ctx = ctx.clone();
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &ctx) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, ctx: &ServeContext) -> Result<()> {
    // Early exit if shutdown requested
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let url = request.url().to_owned();
    let route = url.split('?').next().unwrap_or_default();
    let readable = matches!(request.method(), Method::Get | Method::Head);

    match route {
        HOTRELOAD_URL if readable => response::respond_hotreload_js(request, get_actual_ws_port()),
        RUN_URL if *request.method() == Method::Post => {
            crate::debug!("serve"; "run requested");
            if ctx.preview_tx.send(PreviewMsg::Run).is_ok() {
                response::respond_no_content(request)
            } else {
                response::respond_unavailable(request)
            }
        }
        "/" | "/index.html" if readable => match ctx.slot.load() {
            Some(published) => response::respond_preview(request, &published),
            None => response::respond_loading(request),
        },
        _ if readable => match path::resolve_path(&url, ctx.config.root()) {
            Some(path) => response::respond_file(request, &path),
            None => response::respond_not_found(request),
        },
        _ => response::respond_method_not_allowed(request),
    }
}
