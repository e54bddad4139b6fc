//! Per-request logging middleware.
//!
//! # Responsibilities
//! - Access backend: one formatted line per request in the order
//!   `addr ts method url status referrer - size time_ms [user]`
//! - Structured backend: one tracing event per request carrying the path
//!
//! # Design Decisions
//! - The backend is fixed at startup; the middleware branches on a copy held
//!   in application state
//! - IPv4-mapped IPv6 client addresses are rendered without the `::ffff:`
//!   prefix, matching what operators expect from an access log

use std::net::SocketAddr;
use std::time::Instant;

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{header, Request};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{SecondsFormat, Utc};

use crate::http::server::AppState;
use crate::observability::logging::LoggerBackend;

/// Authenticated user identity, inserted as a request extension by auth
/// layers. Absent on unauthenticated requests.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub email: String,
}

/// Log one request with the configured backend.
pub async fn request_log(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request<Body>,
    next: Next,
) -> Response {
    match state.logger {
        LoggerBackend::Structured => {
            tracing::info!(target: "request", path = %req.uri().path(), "request");
            next.run(req).await
        }
        LoggerBackend::Access => access_line(addr, req, next).await,
    }
}

async fn access_line(addr: SocketAddr, req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();

    let remote = strip_mapped_prefix(&addr.ip().to_string());
    let method = req.method().to_string();
    let url = req.uri().to_string();
    let referrer = req
        .headers()
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let user = req
        .extensions()
        .get::<AuthedUser>()
        .map(|u| u.email.clone())
        .unwrap_or_else(|| "unauth".to_string());

    let response = next.run(req).await;

    let size = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let line = [
        remote,
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        method,
        url,
        response.status().as_u16().to_string(),
        referrer,
        "-".to_string(),
        size,
        format!("{}ms", start.elapsed().as_millis()),
        format!("[{user}]"),
    ]
    .join(" ");

    tracing::info!(target: "access", "{line}");

    response
}

/// Strip the IPv4-mapped prefix from an IPv6 rendering of an IPv4 address.
fn strip_mapped_prefix(addr: &str) -> String {
    addr.strip_prefix("::ffff:").unwrap_or(addr).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_prefix_stripped() {
        assert_eq!(strip_mapped_prefix("::ffff:10.0.0.5"), "10.0.0.5");
    }

    #[test]
    fn plain_addresses_untouched() {
        assert_eq!(strip_mapped_prefix("10.0.0.5"), "10.0.0.5");
        assert_eq!(strip_mapped_prefix("::1"), "::1");
    }
}
