use std::time::Duration;

use tungstenite::protocol::Message;

use super::Clients;

/// Background thread polling clients for close frames and dead sockets.
///
/// Browsers never send anything the server acts on; reading only keeps
/// the connection state machine moving so closes are noticed.
pub(super) fn client_reader_loop(clients: Clients) {
    while !crate::core::is_shutdown() {
        std::thread::sleep(Duration::from_millis(100));

        let mut clients = clients.lock();
        let before = clients.len();
        clients.retain_mut(|ws| match ws.read() {
            Ok(Message::Close(_)) => false,
            Ok(_) => true,
            Err(tungstenite::Error::Io(ref e)) if e.kind() == std::io::ErrorKind::WouldBlock => {
                true
            }
            Err(_) => false,
        });

        let dropped = before - clients.len();
        if dropped > 0 {
            crate::debug!("ws"; "dropped {} client(s), {} left", dropped, clients.len());
        }
    }
}
