//! Shutdown state for serve mode.
//!
//! Ctrl+C flips `STOPPING` once. Before `serve` has bound its server the
//! process simply exits. Afterwards the HTTP loop is unblocked and the actor
//! system is told to wind down.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use crossbeam::channel::Sender;
use tiny_http::Server;

static STOPPING: AtomicBool = AtomicBool::new(false);

/// What Ctrl+C has to wake up once serving.
struct Registered {
    server: Arc<Server>,
    actors: Sender<()>,
}

static REGISTERED: OnceLock<Registered> = OnceLock::new();

/// Install the Ctrl+C handler. Call once at program start.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(on_interrupt).context("failed to set Ctrl+C handler")
}

fn on_interrupt() {
    STOPPING.store(true, Ordering::SeqCst);

    let Some(registered) = REGISTERED.get() else {
        std::process::exit(0);
    };

    crate::log!("serve"; "shutting down...");
    let _ = registered.actors.send(());
    registered.server.unblock();
}

/// Hand the bound server and the actor signal to the Ctrl+C handler.
pub fn register_server(server: Arc<Server>, actors: Sender<()>) {
    let _ = REGISTERED.set(Registered { server, actors });
}

/// Whether Ctrl+C was pressed.
pub fn is_shutdown() -> bool {
    STOPPING.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_stopping_by_default() {
        assert!(!is_shutdown());
    }
}
