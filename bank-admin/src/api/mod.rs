//! HTTP API
//!
//! - [`health`] - liveness check
//! - [`auth`] - login, logout, current user
//! - [`dashboard`] - landing page menu and counters
//! - [`users`] - login account management
//! - [`clients`], [`branches`], [`employees`], [`accounts`],
//!   [`transactions`], [`loans`], [`credit_cards`] - bank records

pub mod accounts;
pub mod auth;
pub mod branches;
pub mod clients;
pub mod credit_cards;
pub mod dashboard;
pub mod employees;
pub mod health;
pub mod loans;
pub mod transactions;
pub mod users;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_session;
use crate::core::ServerState;

/// All routes, no middleware
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(users::router())
        .merge(clients::router())
        .merge(branches::router())
        .merge(employees::router())
        .merge(accounts::router())
        .merge(transactions::router())
        .merge(loans::router())
        .merge(credit_cards::router())
}

/// Fully configured application, used by the server and the HTTP tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new())
        .with_state(state)
}
