use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Json, Response};
use thiserror::Error;

use swagdoc_core::Documentation;
use swagdoc_core::error::DocError;
use swagdoc_core::resolve::RequestContext;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[derive(Clone)]
struct DocsState {
    docs: Arc<Documentation>,
    local_port: Option<u16>,
}

/// A router answering every documentation route of `docs`; any other path
/// is a 404.
pub fn router(docs: Arc<Documentation>) -> Router {
    build_router(docs, None)
}

/// Like [`router`], for a server listening on `port`. Requests whose `Host`
/// carries no port report this one in their base path.
pub fn router_on_port(docs: Arc<Documentation>, port: u16) -> Router {
    build_router(docs, Some(port))
}

fn build_router(docs: Arc<Documentation>, local_port: Option<u16>) -> Router {
    Router::new()
        .fallback(serve_docs)
        .with_state(DocsState { docs, local_port })
}

/// Bind `addr` and serve `docs` until the process is stopped.
pub async fn serve(docs: Arc<Documentation>, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local = listener.local_addr()?;
    log::info!(
        "serving documentation on http://{local}{}",
        docs.routes().root()
    );
    axum::serve(listener, router_on_port(docs, local.port())).await?;
    Ok(())
}

async fn serve_docs(
    State(state): State<DocsState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    let ctx = request_context(&uri, &headers, state.local_port);
    match state.docs.handle(uri.path(), &ctx) {
        Ok(doc) => Json(doc).into_response(),
        Err(err) => {
            log::debug!("{} {}: {err}", method, uri.path());
            error_response(&err)
        }
    }
}

fn error_response(err: &DocError) -> Response {
    let status = match err {
        DocError::ResourceNotFound(_) | DocError::RouteNotFound(_) => StatusCode::NOT_FOUND,
        DocError::UnsupportedFormat(_) => StatusCode::NOT_ACCEPTABLE,
    };
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// Derive the request context from what the client and any proxy sent.
///
/// Scheme: `X-Forwarded-Proto`, then the URI, then `http`. Host: `Host`, then
/// the URI authority, then `localhost`. Port: the `Host` port, then
/// `X-Forwarded-Port`, then the URI port, then the listening port, then the
/// scheme's default.
pub fn request_context(uri: &Uri, headers: &HeaderMap, local_port: Option<u16>) -> RequestContext {
    let scheme = header_value(headers, "x-forwarded-proto")
        .or_else(|| uri.scheme_str())
        .unwrap_or("http")
        .to_ascii_lowercase();

    let authority = header_value(headers, header::HOST.as_str())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
        .unwrap_or_else(|| "localhost".to_string());
    let (host, host_port) = split_host_port(&authority);

    let port = host_port
        .or_else(|| header_value(headers, "x-forwarded-port").and_then(|p| p.parse().ok()))
        .or_else(|| uri.port_u16())
        .or(local_port)
        .unwrap_or(if scheme == "https" { 443 } else { 80 });

    RequestContext::new(scheme, host, port)
}

/// First comma-separated value of a header, as proxies may append to it.
fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn split_host_port(authority: &str) -> (&str, Option<u16>) {
    // bracketed IPv6 literals keep their colons
    if let Some(end) = authority.rfind(']') {
        let (host, rest) = authority.split_at(end + 1);
        return (host, rest.strip_prefix(':').and_then(|p| p.parse().ok()));
    }
    match authority.rsplit_once(':') {
        Some((host, port)) => match port.parse() {
            Ok(port) => (host, Some(port)),
            Err(_) => (authority, None),
        },
        None => (authority, None),
    }
}
