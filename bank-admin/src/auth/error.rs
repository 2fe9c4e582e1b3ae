use shared::error::{AppError, ErrorCode};
use shared::models::{Action, ResourceType};
use thiserror::Error;

/// Authentication and authorization failures.
///
/// `InvalidCredentials` is deliberately the single outcome for an unknown
/// username, a wrong password and an unusable stored credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Session expired")]
    SessionExpired,

    #[error("Permission denied: {action} on {resource}")]
    PermissionDenied {
        resource: ResourceType,
        action: Action,
    },

    #[error("Authentication unavailable: {0}")]
    Unavailable(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::invalid_credentials(),
            AuthError::NotAuthenticated => AppError::not_authenticated(),
            AuthError::SessionExpired => AppError::new(ErrorCode::SessionExpired),
            // Generic message only; the denied pair goes to the security log
            AuthError::PermissionDenied { .. } => AppError::new(ErrorCode::PermissionDenied),
            AuthError::Unavailable(msg) => AppError::internal(msg),
        }
    }
}
