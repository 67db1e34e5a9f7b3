use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tiny_http::Server;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use super::{RUN_URL, ServeContext, handle_request};
use crate::actor::messages::PreviewMsg;
use crate::config::ProjectConfig;
use crate::embed::serve::{HOTRELOAD_URL, hotreload_tag};
use crate::preview::{DocumentSlot, Skeleton, Snapshot, compose};

struct Harness {
    _temp: TempDir,
    slot: Arc<DocumentSlot>,
    preview_rx: UnboundedReceiver<PreviewMsg>,
    ctx: ServeContext,
}

fn harness() -> Harness {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("lib.css"), "body{}").unwrap();

    let mut config = ProjectConfig::default();
    config.set_root(&crate::utils::path::normalize_path(temp.path()));

    let slot = Arc::new(DocumentSlot::new());
    let (preview_tx, preview_rx) = mpsc::unbounded_channel();
    let ctx = ServeContext {
        config: Arc::new(config),
        slot: Arc::clone(&slot),
        preview_tx,
    };

    Harness {
        _temp: temp,
        slot,
        preview_rx,
        ctx,
    }
}

/// Send one raw request through `handle_request`, return the raw response.
fn exchange(ctx: &ServeContext, method: &str, url: &str) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();

    let mut client = TcpStream::connect(addr).unwrap();
    client
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    write!(
        client,
        "{method} {url} HTTP/1.1\r\nHost: localhost\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    )
    .unwrap();

    let request = server.recv().unwrap();
    handle_request(request, ctx).unwrap();

    read_response(&mut client)
}

/// Read headers, then exactly `Content-Length` body bytes.
fn read_response(client: &mut TcpStream) -> String {
    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        if let Some(pos) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = client.read(&mut buf).unwrap();
        assert!(n > 0, "connection closed before headers");
        raw.extend_from_slice(&buf[..n]);
    };

    let head = String::from_utf8_lossy(&raw[..header_end]).to_string();
    let length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);

    while raw.len() < header_end + length {
        let n = client.read(&mut buf).unwrap();
        assert!(n > 0, "connection closed before body");
        raw.extend_from_slice(&buf[..n]);
    }

    String::from_utf8(raw[..header_end + length].to_vec()).unwrap()
}

fn status(response: &str) -> &str {
    response.split_whitespace().nth(1).unwrap_or_default()
}

fn body(response: &str) -> &str {
    response.split_once("\r\n\r\n").map_or("", |(_, body)| body)
}

#[test]
fn test_root_serves_published_document() {
    let h = harness();
    let document = compose(&Snapshot::new("<p>hi</p>", "", ""), &Skeleton::default());
    h.slot.publish(document.clone());

    let response = exchange(&h.ctx, "GET", "/");
    assert_eq!(status(&response), "200");
    assert!(response.contains("X-Livepen-Revision: 1"));

    // Served copy has the reload client; the document itself is untouched
    let body = body(&response);
    assert!(body.contains(&hotreload_tag(1)));
    assert_eq!(body.replace(&hotreload_tag(1), ""), document.as_str());
}

#[test]
fn test_root_before_first_refresh_is_loading_page() {
    let h = harness();
    let response = exchange(&h.ctx, "GET", "/index.html");
    assert_eq!(status(&response), "200");
    assert!(body(&response).contains(&hotreload_tag(0)));
}

#[test]
fn test_run_trigger_sends_run() {
    let mut h = harness();
    let response = exchange(&h.ctx, "POST", RUN_URL);
    assert_eq!(status(&response), "204");
    assert!(matches!(h.preview_rx.try_recv(), Ok(PreviewMsg::Run)));
}

#[test]
fn test_run_trigger_requires_post() {
    let mut h = harness();
    let response = exchange(&h.ctx, "GET", RUN_URL);
    // GET falls through to the static lookup
    assert_eq!(status(&response), "404");
    assert!(h.preview_rx.try_recv().is_err());
}

#[test]
fn test_hotreload_js_served() {
    let h = harness();
    let response = exchange(&h.ctx, "GET", HOTRELOAD_URL);
    assert_eq!(status(&response), "200");
    assert!(response.contains("text/javascript"));
    assert!(body(&response).contains("WebSocket"));
}

#[test]
fn test_static_file_and_not_found() {
    let h = harness();
    let found = exchange(&h.ctx, "GET", "/lib.css");
    assert_eq!(status(&found), "200");
    assert_eq!(body(&found), "body{}");

    let missing = exchange(&h.ctx, "GET", "/nope.js");
    assert_eq!(status(&missing), "404");
}

#[test]
fn test_other_methods_rejected() {
    let h = harness();
    let response = exchange(&h.ctx, "DELETE", "/lib.css");
    assert_eq!(status(&response), "405");
}
