//! Single-origin CORS.
//!
//! Headers are only added when the request's `Origin` matches the configured
//! origin exactly; any other origin gets a plain response.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ORIGIN, VARY,
};
use axum::http::{HeaderMap, HeaderValue};

/// Add CORS headers to `response` if `request`'s origin is allowed.
///
/// Returns whether headers were added.
pub fn apply(allowed_origin: Option<&str>, request: &HeaderMap, response: &mut HeaderMap) -> bool {
    response.append(VARY, HeaderValue::from_static("Origin"));

    let Some(allowed) = allowed_origin else {
        return false;
    };
    let Some(origin) = request.get(ORIGIN) else {
        return false;
    };
    if origin.as_bytes() != allowed.as_bytes() {
        return false;
    }

    response.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    response.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("GET"));
    response.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    true
}
