//! Session extractor
//!
//! Handlers take a [`Principal`] argument to require a logged-in user.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use crate::auth::session::{SessionLookup, token_from_headers};
use crate::auth::{AuthError, Principal};
use crate::core::ServerState;
use crate::security_log;

impl FromRequestParts<ServerState> for Principal {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by the session middleware
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(principal.clone());
        }

        let principal = resolve(&parts.headers, parts.uri.path(), state)?;
        parts.extensions.insert(principal.clone());
        Ok(principal)
    }
}

/// Look up the session named by the request cookies
pub(crate) fn resolve(
    headers: &http::HeaderMap,
    path: &str,
    state: &ServerState,
) -> Result<Principal, AuthError> {
    let Some(token) = token_from_headers(headers) else {
        security_log!("WARN", "auth_missing", uri = path);
        return Err(AuthError::NotAuthenticated);
    };

    match state.auth.sessions().lookup(&token) {
        SessionLookup::Active(principal) => Ok(principal),
        SessionLookup::Expired => {
            security_log!("INFO", "session_expired", uri = path);
            Err(AuthError::SessionExpired)
        }
        SessionLookup::Missing => {
            security_log!("WARN", "session_unknown", uri = path);
            Err(AuthError::NotAuthenticated)
        }
    }
}
