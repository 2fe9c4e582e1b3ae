//! Service-layer error
//!
//! `ServiceError` lets handlers use `?` on store results, on authorization
//! checks (`AuthError`) and on business errors (`AppError`) alike, and turns
//! all of them into an [`AppError`] response.

use axum::Json;
use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::auth::AuthError;
use crate::db::{BoxError, StoreError};

/// - `Store`: storage or infrastructure failure (logged, mapped to InternalError)
/// - `App`: business-rule error, passed through to the client
#[derive(Debug)]
pub enum ServiceError {
    Store(BoxError),
    App(AppError),
}

/// Constraint violations that no handler claimed become generic conflicts
impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Backend(e) => ServiceError::Store(e),
            StoreError::Duplicate(constraint) => ServiceError::App(
                AppError::new(ErrorCode::AlreadyExists).with_detail("constraint", constraint),
            ),
            StoreError::ForeignKey(constraint) => ServiceError::App(
                AppError::new(ErrorCode::InvalidReference).with_detail("constraint", constraint),
            ),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        ServiceError::App(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(store_err) => {
                tracing::error!(error = %store_err, "Store operation failed");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Error mapper for deletes.
///
/// A foreign-key violation on `constraint` means the dependents the handler
/// checked for appeared in the meantime and becomes `code`; a violation on
/// any other constraint becomes `StillReferenced`.
///
/// ```ignore
/// state.clients.delete(id).await
///     .map_err(delete_blocked(constraint::ACCOUNT_CLIENT, ErrorCode::ClientHasAccounts))?;
/// ```
pub fn delete_blocked(
    constraint: &'static str,
    code: ErrorCode,
) -> impl FnOnce(StoreError) -> ServiceError {
    move |e| match e {
        StoreError::ForeignKey(violated) if violated == constraint => {
            AppError::new(code).with_detail("constraint", violated).into()
        }
        StoreError::ForeignKey(violated) => AppError::new(ErrorCode::StillReferenced)
            .with_detail("constraint", violated)
            .into(),
        other => other.into(),
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Handler result: JSON body or an error response
pub type ApiResult<T> = Result<Json<T>, ServiceError>;
