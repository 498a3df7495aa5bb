//! services/api/src/web/middleware.rs
//!
//! Bearer-header middleware for the analysis routes.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

/// Rejects requests that do not carry an `Authorization: Bearer <token>` header.
///
/// Only the shape of the header is checked here. Whether the token is valid is
/// decided by the session service that issued it, before traffic reaches us.
pub async fn require_bearer(req: Request, next: Next) -> Result<Response, StatusCode> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token);

    if token.is_none() {
        warn!(path = %req.uri().path(), "Rejected request without a bearer token");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(req).await)
}

/// Extracts the token from a `Bearer <token>` header value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    let well_formed = scheme.eq_ignore_ascii_case("bearer")
        && !token.is_empty()
        && !token.contains(char::is_whitespace);
    well_formed.then_some(token)
}
