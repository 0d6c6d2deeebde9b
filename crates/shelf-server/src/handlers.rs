//! HTTP request handling.
//!
//! A single fallback handler receives every request: the path is
//! segmented, resolved to an action, and the action produces the
//! response. Unresolvable paths degrade to an ancestor page, so the
//! pipeline never produces a routing 404.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Request, header};
use axum::response::Response;
use shelf_resolver::{PathSegments, dispatch};

use crate::error::ServerError;
use crate::respond::respond;
use crate::state::AppState;

/// Handle any request against the content tree.
pub(crate) async fn handle_request(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
) -> Result<Response, ServerError> {
    let path = req.uri().path();
    log_request(req.headers(), addr, path);

    let segments = PathSegments::parse(path);
    let action = dispatch(state.store.as_ref(), &segments);
    respond(&state, action)
}

/// Log the request line with the resolved client address.
fn log_request(headers: &HeaderMap, addr: SocketAddr, path: &str) {
    let client = client_ip(headers, addr);
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");
    tracing::info!(client = %client, host = %host, path = %path, "Request");
}

/// Client address, preferring the first `X-Forwarded-For` hop.
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_owned())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}
