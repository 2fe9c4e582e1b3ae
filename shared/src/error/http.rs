//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::ClientNotFound
            | Self::BranchNotFound
            | Self::EmployeeNotFound
            | Self::AccountNotFound
            | Self::TransactionNotFound
            | Self::LoanNotFound
            | Self::CreditCardNotFound
            | Self::UserNotFound => StatusCode::NOT_FOUND,

            Self::AlreadyExists
            | Self::StillReferenced
            | Self::ClientHasAccounts
            | Self::BranchHasEmployees
            | Self::EmployeeHasAccounts
            | Self::AccountHasTransactions
            | Self::UsernameExists => StatusCode::CONFLICT,

            Self::NotAuthenticated | Self::InvalidCredentials | Self::SessionExpired => {
                StatusCode::UNAUTHORIZED
            }

            Self::PermissionDenied | Self::CannotDeleteSelf => StatusCode::FORBIDDEN,

            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_are_unauthorized() {
        assert_eq!(
            ErrorCode::NotAuthenticated.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::InvalidCredentials.http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_permission_errors_are_forbidden() {
        assert_eq!(
            ErrorCode::PermissionDenied.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::CannotDeleteSelf.http_status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_conflict_and_not_found() {
        assert_eq!(
            ErrorCode::ClientHasAccounts.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ErrorCode::UsernameExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::ClientNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::AccountHasTransactions.http_status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ErrorCode::StillReferenced.http_status(), StatusCode::CONFLICT);
        assert_eq!(ErrorCode::LoanNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_default() {
        assert_eq!(
            ErrorCode::ValidationFailed.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::UnknownRole.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::InvalidReference.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::InvalidCardNumber.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::PasswordRequired.http_status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_system_errors() {
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
