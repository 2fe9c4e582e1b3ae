//! Unified error codes for the bank back-office
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Banking record errors (clients, branches, employees, accounts…)
//! - 4xxx: User account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the frontend can switch
/// on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Record cannot be deleted while other records point at it
    StillReferenced = 8,
    /// A referenced record does not exist
    InvalidReference = 9,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// A user cannot delete their own account
    CannotDeleteSelf = 2005,

    // ==================== 3xxx: Banking records ====================
    /// Client not found
    ClientNotFound = 3001,
    /// Client still owns accounts
    ClientHasAccounts = 3002,
    /// Branch not found
    BranchNotFound = 3101,
    /// Branch still has employees
    BranchHasEmployees = 3102,
    /// Employee not found
    EmployeeNotFound = 3201,
    /// Employee still manages accounts
    EmployeeHasAccounts = 3202,
    /// Account not found
    AccountNotFound = 3301,
    /// Account still has transactions
    AccountHasTransactions = 3302,
    /// Transaction not found
    TransactionNotFound = 3401,
    /// Loan not found
    LoanNotFound = 3501,
    /// Credit card not found
    CreditCardNotFound = 3601,
    /// Card number is not 16 digits
    InvalidCardNumber = 3602,

    // ==================== 4xxx: User ====================
    /// User not found
    UserNotFound = 4001,
    /// Username already taken
    UsernameExists = 4002,
    /// Password required for new users
    PasswordRequired = 4003,
    /// Role token is not one of the known roles
    UnknownRole = 4004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::StillReferenced => "Record is still referenced by other records",
            ErrorCode::InvalidReference => "Referenced record does not exist",

            // Auth
            ErrorCode::NotAuthenticated => "Please log in to continue",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::CannotDeleteSelf => "Cannot delete own user",

            // Banking records
            ErrorCode::ClientNotFound => "Client not found",
            ErrorCode::ClientHasAccounts => "Client has associated accounts",
            ErrorCode::BranchNotFound => "Branch not found",
            ErrorCode::BranchHasEmployees => "Branch has associated employees",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::EmployeeHasAccounts => "Employee has associated accounts",
            ErrorCode::AccountNotFound => "Account not found",
            ErrorCode::AccountHasTransactions => "Account has associated transactions",
            ErrorCode::TransactionNotFound => "Transaction not found",
            ErrorCode::LoanNotFound => "Loan not found",
            ErrorCode::CreditCardNotFound => "Credit card not found",
            ErrorCode::InvalidCardNumber => "Card number must be exactly 16 digits",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UsernameExists => "Username already exists",
            ErrorCode::PasswordRequired => "Password is required for new users",
            ErrorCode::UnknownRole => "Unknown role",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::StillReferenced),
            9 => Ok(ErrorCode::InvalidReference),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2005 => Ok(ErrorCode::CannotDeleteSelf),

            // Banking records
            3001 => Ok(ErrorCode::ClientNotFound),
            3002 => Ok(ErrorCode::ClientHasAccounts),
            3101 => Ok(ErrorCode::BranchNotFound),
            3102 => Ok(ErrorCode::BranchHasEmployees),
            3201 => Ok(ErrorCode::EmployeeNotFound),
            3202 => Ok(ErrorCode::EmployeeHasAccounts),
            3301 => Ok(ErrorCode::AccountNotFound),
            3302 => Ok(ErrorCode::AccountHasTransactions),
            3401 => Ok(ErrorCode::TransactionNotFound),
            3501 => Ok(ErrorCode::LoanNotFound),
            3601 => Ok(ErrorCode::CreditCardNotFound),
            3602 => Ok(ErrorCode::InvalidCardNumber),

            // User
            4001 => Ok(ErrorCode::UserNotFound),
            4002 => Ok(ErrorCode::UsernameExists),
            4003 => Ok(ErrorCode::PasswordRequired),
            4004 => Ok(ErrorCode::UnknownRole),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
