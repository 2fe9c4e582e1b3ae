//! Authentication and authorization
//!
//! - [`permissions`] - static role → resource → actions matrix (the Permission Oracle)
//! - [`Authenticator`] - credential checks and session lifecycle
//! - [`SessionStore`] - server-side sessions keyed by cookie token
//! - [`Principal`] - the logged-in identity; also an axum extractor
//! - [`require_session`] - middleware guarding `/api/`

pub mod authenticator;
mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod permissions;
mod principal;
pub mod session;

pub use authenticator::{Authenticator, Login};
pub use error::AuthError;
pub use middleware::require_session;
pub use password::{hash_password, verify_password};
pub use permissions::{allowed_actions, allows, is_allowed, readable_resources, role_display_name};
pub use principal::Principal;
pub use session::{SESSION_COOKIE, SessionConfig, SessionStore};
