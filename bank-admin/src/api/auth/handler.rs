//! Authentication Handlers
//!
//! Login opens a server-side session and hands its token to the browser in
//! an HttpOnly cookie; logout destroys it.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
};
use serde::Deserialize;
use shared::error::ApiResponse;
use shared::models::UserInfo;

use crate::auth::Principal;
use crate::auth::session::{clear_session_cookie, session_cookie, token_from_headers};
use crate::core::ServerState;
use crate::utils::{AppJson, ServiceError};

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    headers: HeaderMap,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let login = state.auth.login(&req.username, &req.password).await?;

    // A session the browser already held is replaced, not kept alongside
    if let Some(previous) = token_from_headers(&headers) {
        state.auth.sessions().destroy(&previous);
    }

    let cookie = session_cookie(&login.token, state.config.session_cookie_secure);
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(login.principal.to_user_info()),
    ))
}

/// POST /api/auth/logout
///
/// Always succeeds; without a session there is nothing to destroy.
pub async fn logout(State(state): State<ServerState>, headers: HeaderMap) -> impl IntoResponse {
    let token = token_from_headers(&headers);
    state.auth.logout(token.as_deref());

    let cookie = clear_session_cookie(state.config.session_cookie_secure);
    ([(header::SET_COOKIE, cookie)], ApiResponse::ok())
}

/// GET /api/auth/me
pub async fn me(principal: Principal) -> Json<UserInfo> {
    Json(principal.to_user_info())
}
