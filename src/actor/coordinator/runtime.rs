use std::time::Duration;

use crossbeam::channel::Receiver;
use tokio::sync::mpsc::UnboundedSender;

use crate::actor::fs::FsActor;
use crate::actor::messages::{PreviewMsg, WsMsg};
use crate::actor::preview::PreviewActor;
use crate::actor::ws::WsActor;

/// Grace period for each actor to wind down after a shutdown message.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

/// Run all actors concurrently until shutdown.
pub(super) async fn run_actors(
    fs: Option<FsActor>,
    preview: PreviewActor,
    ws: WsActor,
    preview_tx: UnboundedSender<PreviewMsg>,
    ws_tx: UnboundedSender<WsMsg>,
    shutdown_rx: Option<Receiver<()>>,
) {
    let preview_handle = tokio::spawn(preview.run());
    let ws_handle = tokio::spawn(ws.run());
    let fs_handle = fs.map(|fs| tokio::spawn(fs.run()));

    match shutdown_rx {
        Some(rx) => loop {
            if rx.try_recv().is_ok() || crate::core::is_shutdown() {
                crate::debug!("actor"; "shutdown signal received");
                break;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        },
        None => {
            // Without an external signal, run until an actor ends on its own
            tokio::select! {
                _ = wait_finished(&preview_handle) => {}
                _ = wait_finished(&ws_handle) => {}
            }
        }
    }

    // Preview first: its last refresh may still queue a reload
    let _ = preview_tx.send(PreviewMsg::Shutdown);
    let _ = tokio::time::timeout(SHUTDOWN_GRACE, preview_handle).await;

    let _ = ws_tx.send(WsMsg::Shutdown);
    let _ = tokio::time::timeout(SHUTDOWN_GRACE, ws_handle).await;

    if let Some(handle) = fs_handle {
        handle.abort();
    }
}

async fn wait_finished<T>(handle: &tokio::task::JoinHandle<T>) {
    while !handle.is_finished() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
