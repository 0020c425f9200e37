//! Logging middleware

use std::time::Instant;

use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use tracing::{info, warn};

/// How loudly a finished request is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Normal,
    ClientError,
    ServerError,
}

fn severity(status: StatusCode) -> Severity {
    if status.is_server_error() {
        Severity::ServerError
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        Severity::ClientError
    } else {
        Severity::Normal
    }
}

/// Log method, path, status and latency of every request
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    match severity(response.status()) {
        Severity::ServerError => warn!(
            method = %method,
            path = %path,
            status,
            elapsed_ms = %elapsed_ms,
            "Request failed"
        ),
        Severity::ClientError => warn!(
            method = %method,
            path = %path,
            status,
            elapsed_ms = %elapsed_ms,
            "Request rejected"
        ),
        Severity::Normal => info!(
            method = %method,
            path = %path,
            status,
            elapsed_ms = %elapsed_ms,
            "Request completed"
        ),
    }

    response
}
