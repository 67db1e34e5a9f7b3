//! Reload socket acceptor.
//!
//! Only accepts TCP connections. WsActor performs the WebSocket handshake
//! and owns each client from then on.

use std::io::ErrorKind;
use std::net::{IpAddr, TcpListener};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedSender;

use crate::actor::messages::WsMsg;

/// Ports tried, counting up from the requested one.
const PORT_ATTEMPTS: u16 = 10;

/// Idle wait between accept polls.
const ACCEPT_POLL: Duration = Duration::from_millis(100);

/// Bind the reload socket and start handing accepted streams to WsActor.
///
/// Listens on the same interface as the HTTP server so a LAN-exposed preview
/// reaches the reload channel too. Returns the port actually bound.
pub fn start_ws_server(
    interface: IpAddr,
    base_port: u16,
    ws_tx: UnboundedSender<WsMsg>,
) -> Result<u16> {
    let listener = bind_first_free(interface, base_port, PORT_ATTEMPTS)?;
    let port = listener.local_addr()?.port();
    listener.set_nonblocking(true)?;

    std::thread::spawn(move || accept_loop(&listener, &ws_tx));
    Ok(port)
}

/// Runs until shutdown or until WsActor drops its receiver.
fn accept_loop(listener: &TcpListener, ws_tx: &UnboundedSender<WsMsg>) {
    while !crate::core::is_shutdown() {
        let stream = match listener.accept() {
            Ok((stream, addr)) => {
                crate::debug!("ws"; "client connected: {}", addr);
                stream
            }
            Err(e) => {
                if e.kind() != ErrorKind::WouldBlock {
                    crate::log!("ws"; "accept error: {}", e);
                }
                std::thread::sleep(ACCEPT_POLL);
                continue;
            }
        };

        // the handshake runs blocking; WsActor switches to polling afterwards
        let _ = stream.set_nonblocking(false);
        if ws_tx.send(WsMsg::AddClient(stream)).is_err() {
            crate::debug!("ws"; "actor gone, acceptor stopping");
            return;
        }
    }
}

fn bind_first_free(interface: IpAddr, base_port: u16, attempts: u16) -> Result<TcpListener> {
    let mut last_error = None;
    for port in (0..attempts).map(|offset| base_port.saturating_add(offset)) {
        match TcpListener::bind((interface, port)) {
            Ok(listener) => return Ok(listener),
            Err(e) => last_error = Some(e),
        }
    }

    let reason = last_error.map(|e| e.to_string()).unwrap_or_default();
    anyhow::bail!("no free reload port in {base_port}..{}: {reason}", base_port.saturating_add(attempts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    const LOOPBACK: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    #[test]
    fn test_bind_skips_taken_port() {
        let taken = bind_first_free(LOOPBACK, 0, 1).unwrap();
        let port = taken.local_addr().unwrap().port();

        let next = bind_first_free(LOOPBACK, port, 3).unwrap();
        assert_ne!(next.local_addr().unwrap().port(), port);
    }

    #[test]
    fn test_bind_gives_up_after_attempts() {
        let taken = bind_first_free(LOOPBACK, 0, 1).unwrap();
        let port = taken.local_addr().unwrap().port();

        assert!(bind_first_free(LOOPBACK, port, 1).is_err());
    }

    #[test]
    fn test_start_ws_server_hands_out_clients() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let port = start_ws_server(LOOPBACK, 0, tx).unwrap();

        let _client = std::net::TcpStream::connect((LOOPBACK, port)).unwrap();

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
        loop {
            match rx.try_recv() {
                Ok(WsMsg::AddClient(_)) => break,
                Ok(_) => panic!("unexpected message"),
                Err(_) if std::time::Instant::now() < deadline => {
                    std::thread::sleep(std::time::Duration::from_millis(20));
                }
                Err(e) => panic!("no client handed over: {e}"),
            }
        }
    }
}
