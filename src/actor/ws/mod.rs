//! WebSocket Actor
//!
//! Manages reload clients:
//! - greets new clients with the current revision
//! - broadcasts reload / error / clear_error
//! - replays a pending error to clients that connect while it is showing
//! - drops clients that closed or failed
//!
//! ```text
//! PreviewActor --[Reload/Error]--> WsActor --[broadcast]--> Clients
//! ```

mod client_io;

use std::net::TcpStream;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::messages::WsMsg;
use crate::preview::DocumentSlot;
use crate::reload::message::HotReloadMessage;

type Clients = Arc<Mutex<Vec<WebSocket<TcpStream>>>>;

/// An error currently shown in browsers.
#[derive(Debug, Clone)]
struct PendingError {
    path: String,
    error: String,
}

/// WebSocket Actor - manages client connections and broadcasts
pub struct WsActor {
    rx: UnboundedReceiver<WsMsg>,
    /// Connected clients (shared for broadcast + read threads)
    clients: Clients,
    /// Source of the revision sent in the greeting
    slot: Arc<DocumentSlot>,
    pending_error: Option<PendingError>,
}

impl WsActor {
    pub fn new(rx: UnboundedReceiver<WsMsg>, slot: Arc<DocumentSlot>) -> Self {
        Self {
            rx,
            clients: Arc::new(Mutex::new(Vec::new())),
            slot,
            pending_error: None,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        let clients_for_reader = Arc::clone(&self.clients);
        std::thread::spawn(move || {
            client_io::client_reader_loop(clients_for_reader);
        });

        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Reload { revision } => {
                    crate::debug!("ws"; "sending reload (revision {})", revision);
                    self.broadcast(&HotReloadMessage::reload(revision));
                }

                WsMsg::Error { path, error } => {
                    let msg = HotReloadMessage::error(&path, &error);
                    self.pending_error = Some(PendingError { path, error });
                    self.broadcast(&msg);
                }

                WsMsg::ClearError => {
                    self.pending_error = None;
                    self.broadcast(&HotReloadMessage::clear_error());
                }

                WsMsg::AddClient(stream) => self.add_client(stream),

                WsMsg::Shutdown => {
                    crate::debug!("ws"; "shutting down");
                    let mut clients = self.clients.lock();
                    for mut ws in clients.drain(..) {
                        let _ = ws.close(None);
                        let _ = ws.flush();
                    }
                    break;
                }
            }
        }
    }

    /// Handshake, greet, and register a new client.
    fn add_client(&self, stream: TcpStream) {
        let mut ws = match tungstenite::accept(stream) {
            Ok(ws) => ws,
            Err(e) => {
                crate::log!("ws"; "handshake failed: {}", e);
                return;
            }
        };

        if let Err(e) = self.greet(&mut ws) {
            crate::log!("ws"; "failed to greet client: {}", e);
            return;
        }

        // Reads are polled by the reader thread from here on
        let _ = ws.get_ref().set_nonblocking(true);

        let mut clients = self.clients.lock();
        clients.push(ws);
        crate::debug!("ws"; "client connected (total: {})", clients.len());
    }

    fn greet(&self, ws: &mut WebSocket<TcpStream>) -> tungstenite::Result<()> {
        let connected = HotReloadMessage::connected(self.slot.revision());
        ws.send(Message::Text(connected.to_json().into()))?;

        if let Some(pending) = &self.pending_error {
            let msg = HotReloadMessage::error(&pending.path, &pending.error);
            ws.send(Message::Text(msg.to_json().into()))?;
            crate::debug!("ws"; "sent pending error to new client");
        }
        Ok(())
    }

    /// Broadcast a message to all connected clients
    fn broadcast(&self, msg: &HotReloadMessage) {
        let msg = Message::Text(msg.to_json().into());
        let mut clients = self.clients.lock();

        if clients.is_empty() {
            crate::debug!("ws"; "no clients connected");
            return;
        }

        clients.retain_mut(|ws| match ws.send(msg.clone()) {
            Ok(()) => true,
            Err(e) => {
                crate::debug!("ws"; "client disconnected: {}", e);
                false
            }
        });
        crate::debug!("ws"; "broadcast to {} clients", clients.len());
    }
}
