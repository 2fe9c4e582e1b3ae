//! Store errors
//!
//! Constraint violations are kept apart from other failures so handlers can
//! turn them into business errors (a username already taken, a client that
//! still owns accounts) instead of a 500.

use sqlx::error::ErrorKind;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type StoreResult<T> = Result<T, StoreError>;

/// Constraint names, as PostgreSQL derives them from the schema.
/// The in-memory store reports the same names.
pub mod constraint {
    pub const USERNAME_UNIQUE: &str = "app_user_username_key";
    pub const USER_EMPLOYEE: &str = "app_user_employee_id_fkey";
    pub const EMPLOYEE_BRANCH: &str = "employee_branch_id_fkey";
    pub const ACCOUNT_CLIENT: &str = "account_client_id_fkey";
    pub const ACCOUNT_BRANCH: &str = "account_branch_id_fkey";
    pub const ACCOUNT_EMPLOYEE: &str = "account_employee_id_fkey";
    pub const TRANSACTION_ACCOUNT: &str = "bank_transaction_account_id_fkey";
    pub const TRANSACTION_EMPLOYEE: &str = "bank_transaction_employee_id_fkey";
    pub const LOAN_CLIENT: &str = "loan_client_id_fkey";
    pub const LOAN_EMPLOYEE: &str = "loan_employee_id_fkey";
    pub const LOAN_BRANCH: &str = "loan_branch_id_fkey";
    pub const CARD_ACCOUNT: &str = "credit_card_account_id_fkey";
    pub const CARD_CLIENT: &str = "credit_card_client_id_fkey";
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint violated (SQLSTATE 23505)
    #[error("duplicate value violates {0}")]
    Duplicate(String),

    /// Foreign key violated (SQLSTATE 23503): on insert/update the referenced
    /// row is missing, on delete the row is still referenced
    #[error("foreign key {0} violated")]
    ForeignKey(String),

    #[error(transparent)]
    Backend(BoxError),
}

impl StoreError {
    pub(crate) fn foreign_key(constraint: &str) -> Self {
        StoreError::ForeignKey(constraint.to_string())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            let constraint = db.constraint().unwrap_or_default().to_string();
            match db.kind() {
                ErrorKind::UniqueViolation => return StoreError::Duplicate(constraint),
                ErrorKind::ForeignKeyViolation => return StoreError::ForeignKey(constraint),
                _ => {}
            }
        }
        StoreError::Backend(Box::new(e))
    }
}

impl From<BoxError> for StoreError {
    fn from(e: BoxError) -> Self {
        StoreError::Backend(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_backend() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn test_display_names_constraint() {
        let err = StoreError::foreign_key(constraint::ACCOUNT_CLIENT);
        assert_eq!(err.to_string(), "foreign key account_client_id_fkey violated");
    }
}
