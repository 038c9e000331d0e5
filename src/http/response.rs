//! Outbound response construction.
//!
//! # Responsibilities
//! - Diagnostic error bodies carrying the proxy identity
//! - Assembly of translated upstream responses
//!
//! # Design Decisions
//! - Exactly one response is written per request, whichever constructor is
//!   reached first

use axum::body::Body;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

/// 404 for a URL the archive has no capture of near the target timestamp.
pub fn not_found(proxy_name: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("{proxy_name}: Not Found")).into_response()
}

/// 500 carrying the upstream failure detail in the body.
pub fn server_error(proxy_name: &str, detail: &dyn std::fmt::Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("{proxy_name}: Server Error\n\n{detail}"),
    )
        .into_response()
}

/// A translated upstream response: upstream status, translated headers,
/// rewritten or passed-through body.
pub fn translated(status: StatusCode, headers: HeaderMap, body: Body) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
