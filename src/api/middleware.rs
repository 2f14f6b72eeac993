//! Per-caller rate limiting middleware
//!
//! Callers are keyed by the peer IP of the connection. Requests served
//! without connection info (in-process tests) share the `"unknown"` key.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::handlers::AppState;

/// Key used when the peer address is unavailable
pub const UNKNOWN_CALLER: &str = "unknown";

/// Caller identity of a request.
pub fn caller_key(req: &Request<Body>) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CALLER.to_string())
}

/// Rejects over-budget callers before the request reaches a handler.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let caller = caller_key(&req);

    match state.service.admit(caller) {
        Ok(()) => next.run(req).await,
        Err(e) => e.into_response(),
    }
}
