//! Bank back-office server
//!
//! JSON API for the bank's back-office staff. Every request passes two gates:
//!
//! - **Session Authenticator** (`auth::Authenticator`): is there a live
//!   session? Sessions are server-side, created by a successful login.
//! - **Permission Oracle** (`auth::permissions`): may this role perform this
//!   action on this resource? A static, default-deny matrix.
//!
//! # Module layout
//!
//! ```text
//! bank-admin/src/
//! ├── core/    # configuration, state, server
//! ├── auth/    # permissions, passwords, sessions, authenticator, extractor
//! ├── db/      # store traits, PostgreSQL and in-memory backends
//! ├── api/     # HTTP routes and handlers
//! └── utils/   # logging, service error
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

pub use auth::{AuthError, Authenticator, Principal};
pub use crate::core::{Config, Server, ServerState};
pub use utils::init_logger;

/// Security event, routed to the `security` log target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
