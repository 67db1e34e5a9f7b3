//! HTTP response handlers.

use super::content::inject_hotreload_script;
use crate::preview::Published;
use crate::utils::mime::types::{HTML, JAVASCRIPT, PLAIN};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Revision header on preview responses.
const REVISION_HEADER: &str = "X-Livepen-Revision";

/// Respond with the published document and the reload client.
pub fn respond_preview(request: Request, published: &Published) -> Result<()> {
    let revision = published.revision.to_string();
    let revision_header = Header::from_bytes(REVISION_HEADER, revision.as_bytes())
        .map_err(|()| anyhow::anyhow!("invalid revision header"))?;

    if is_head_request(&request) {
        let response = Response::empty(StatusCode(200))
            .with_header(make_header("Content-Type", HTML))
            .with_header(revision_header);
        request.respond(response)?;
        return Ok(());
    }

    let body = inject_hotreload_script(published.document.as_bytes(), published.revision);
    let response = Response::from_data(body)
        .with_header(make_header("Content-Type", HTML))
        .with_header(make_header("Cache-Control", "no-store"))
        .with_header(revision_header);
    request.respond(response)?;
    Ok(())
}

/// Respond with loading page (first refresh not done yet).
///
/// Carries the reload client at revision 0, so the page reloads as soon as a
/// document is published.
pub fn respond_loading(request: Request) -> Result<()> {
    let body = inject_hotreload_script(crate::embed::serve::LOADING_HTML.as_bytes(), 0);
    send_body(request, 200, HTML, body)
}

/// Respond with a static file from the project root.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with hotreload.js from memory.
pub fn respond_hotreload_js(request: Request, ws_port: u16) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 200, JAVASCRIPT);
    }

    let body = crate::embed::serve::hotreload_js(ws_port);
    send_body(request, 200, JAVASCRIPT, body.into_bytes())
}

/// Respond with 204 (run trigger accepted).
pub fn respond_no_content(request: Request) -> Result<()> {
    request.respond(Response::empty(StatusCode(204)))?;
    Ok(())
}

/// Respond with 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, PLAIN);
    }
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 405.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    send_body(request, 405, PLAIN, b"405 Method Not Allowed".to_vec())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

// Static ASCII names and values always form a valid header
fn make_header(key: &'static str, value: &'static str) -> Header {
    Header::from_bytes(key, value).unwrap()
}
