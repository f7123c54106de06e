use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use constant_time_eq::constant_time_eq;
use tracing::warn;

use crate::{error::AppError, AppState};

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";
pub const SOURCE_HEADER: &str = "x-wgss-source";

/// Constant-time comparison of a presented secret. A missing header, a
/// non-UTF-8 header or an empty configured secret never matches.
pub fn secret_matches(provided: Option<&str>, expected: &str) -> bool {
    match provided {
        Some(value) if !expected.is_empty() => {
            constant_time_eq(value.as_bytes(), expected.as_bytes())
        }
        _ => false,
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Guards the admin routes. Runs before any extractor of the inner handler,
/// so a rejected request never reaches the store.
pub async fn require_admin_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !secret_matches(header_value(request.headers(), ADMIN_KEY_HEADER), &state.auth.admin_key) {
        warn!(path = %request.uri().path(), "Rejected request with bad admin key");
        return Err(AppError::Unauthorized);
    }
    Ok(next.run(request).await)
}

/// Guards routes called by the storefront integration. The body is not read
/// until this check has passed.
pub async fn require_source_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !secret_matches(header_value(request.headers(), SOURCE_HEADER), &state.auth.source_key) {
        warn!(path = %request.uri().path(), "Rejected request with bad source header");
        return Err(AppError::UnauthorizedSource);
    }
    Ok(next.run(request).await)
}
