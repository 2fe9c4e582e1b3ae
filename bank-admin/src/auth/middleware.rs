//! Session middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use crate::auth::extractor::resolve;
use crate::core::ServerState;

/// Routes under `/api/` reachable without a session
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/auth/logout"];

/// Require a live session for every `/api/` route.
///
/// Skipped for CORS preflight, non-API paths (health, unknown paths fall
/// through to 404) and [`PUBLIC_API_ROUTES`]. On success the [`Principal`]
/// is stored in the request extensions for the extractor to reuse.
///
/// | Failure | Status |
/// |---------|--------|
/// | no cookie / unknown session | 401 NotAuthenticated |
/// | session past idle or absolute TTL | 401 SessionExpired |
///
/// [`Principal`]: crate::auth::Principal
pub async fn require_session(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let principal = resolve(req.headers(), path, &state)?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}
