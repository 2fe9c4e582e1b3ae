//! Data access
//!
//! Handlers and the authenticator only see the store traits. Two backends:
//! PostgreSQL ([`postgres`]) and an in-process store ([`memory`]) used in
//! development without a database and as the test fake.

pub mod error;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use shared::models::{
    Account, AccountQuery, Branch, BranchQuery, Client, ClientQuery, CreditCard,
    CreditCardQuery, DashboardStats, Employee, EmployeeQuery, Loan, LoanQuery, Transaction,
    TransactionQuery, User, UserQuery,
};

pub use error::{BoxError, StoreError, StoreResult, constraint};
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// User row to insert. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub employee_id: Option<i64>,
}

/// Replacement values for an existing user; `None` keeps the stored hash
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub employee_id: Option<i64>,
}

/// Validated client columns
#[derive(Debug, Clone, PartialEq)]
pub struct ClientFields {
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registered_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchFields {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub opened_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeFields {
    pub branch_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hired_on: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountFields {
    pub client_id: i64,
    pub branch_id: i64,
    pub employee_id: i64,
    pub account_type: String,
    pub balance: f64,
    pub opened_on: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFields {
    pub account_id: i64,
    pub employee_id: Option<i64>,
    pub transaction_type: String,
    pub amount: f64,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoanFields {
    pub client_id: i64,
    pub employee_id: i64,
    pub branch_id: i64,
    pub amount: f64,
    pub interest_rate: f64,
    pub term_months: i32,
    pub approved_on: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreditCardFields {
    pub account_id: i64,
    pub client_id: i64,
    pub card_type: String,
    pub number: String,
    pub credit_limit: f64,
    pub issued_on: NaiveDate,
    pub expires_on: NaiveDate,
    pub status: String,
}

/// Credential and login-account storage
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Exact, case-sensitive username lookup
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    /// Ordered by username
    async fn list(&self, query: &UserQuery) -> StoreResult<Vec<User>>;

    /// Whether `username` is used by any user other than `exclude_id`
    async fn username_taken(&self, username: &str, exclude_id: Option<i64>) -> StoreResult<bool>;

    /// Fails with [`StoreError::Duplicate`] when the username is taken
    async fn create(&self, user: NewUser) -> StoreResult<i64>;

    /// Returns false when no such user exists
    async fn update(&self, id: i64, changes: UserChanges) -> StoreResult<bool>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;

    async fn touch_last_access(&self, id: i64, at: DateTime<Utc>) -> StoreResult<()>;

    async fn count(&self) -> StoreResult<i64>;
}

/// Bank client storage
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Ordered by last name, then first name
    async fn list(&self, query: &ClientQuery) -> StoreResult<Vec<Client>>;

    async fn find(&self, id: i64) -> StoreResult<Option<Client>>;

    async fn create(&self, fields: ClientFields) -> StoreResult<i64>;

    async fn update(&self, id: i64, fields: ClientFields) -> StoreResult<bool>;

    /// Fails with [`StoreError::ForeignKey`] while anything references the client
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Accounts referencing the client, in any status
    async fn account_count(&self, client_id: i64) -> StoreResult<i64>;
}

#[async_trait]
pub trait BranchStore: Send + Sync {
    /// Ordered by name
    async fn list(&self, query: &BranchQuery) -> StoreResult<Vec<Branch>>;

    async fn find(&self, id: i64) -> StoreResult<Option<Branch>>;

    async fn create(&self, fields: BranchFields) -> StoreResult<i64>;

    async fn update(&self, id: i64, fields: BranchFields) -> StoreResult<bool>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;

    async fn employee_count(&self, branch_id: i64) -> StoreResult<i64>;
}

#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Ordered by last name, then first name
    async fn list(&self, query: &EmployeeQuery) -> StoreResult<Vec<Employee>>;

    async fn find(&self, id: i64) -> StoreResult<Option<Employee>>;

    async fn create(&self, fields: EmployeeFields) -> StoreResult<i64>;

    async fn update(&self, id: i64, fields: EmployeeFields) -> StoreResult<bool>;

    /// Linked login accounts are detached, not removed
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    /// Accounts opened by the employee
    async fn account_count(&self, employee_id: i64) -> StoreResult<i64>;
}

#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Ordered by id
    async fn list(&self, query: &AccountQuery) -> StoreResult<Vec<Account>>;

    async fn find(&self, id: i64) -> StoreResult<Option<Account>>;

    async fn create(&self, fields: AccountFields) -> StoreResult<i64>;

    async fn update(&self, id: i64, fields: AccountFields) -> StoreResult<bool>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;

    async fn transaction_count(&self, account_id: i64) -> StoreResult<i64>;
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Newest first
    async fn list(&self, query: &TransactionQuery) -> StoreResult<Vec<Transaction>>;

    async fn find(&self, id: i64) -> StoreResult<Option<Transaction>>;

    async fn create(&self, fields: TransactionFields) -> StoreResult<i64>;

    async fn update(&self, id: i64, fields: TransactionFields) -> StoreResult<bool>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait LoanStore: Send + Sync {
    /// Newest approval first
    async fn list(&self, query: &LoanQuery) -> StoreResult<Vec<Loan>>;

    async fn find(&self, id: i64) -> StoreResult<Option<Loan>>;

    async fn create(&self, fields: LoanFields) -> StoreResult<i64>;

    async fn update(&self, id: i64, fields: LoanFields) -> StoreResult<bool>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

#[async_trait]
pub trait CreditCardStore: Send + Sync {
    /// Ordered by id
    async fn list(&self, query: &CreditCardQuery) -> StoreResult<Vec<CreditCard>>;

    async fn find(&self, id: i64) -> StoreResult<Option<CreditCard>>;

    async fn create(&self, fields: CreditCardFields) -> StoreResult<i64>;

    async fn update(&self, id: i64, fields: CreditCardFields) -> StoreResult<bool>;

    async fn delete(&self, id: i64) -> StoreResult<bool>;
}

/// Landing page counters
#[async_trait]
pub trait StatsStore: Send + Sync {
    async fn dashboard_stats(&self) -> StoreResult<DashboardStats>;
}

/// A backend implementing every store
pub trait Store:
    UserStore
    + ClientStore
    + BranchStore
    + EmployeeStore
    + AccountStore
    + TransactionStore
    + LoanStore
    + CreditCardStore
    + StatsStore
{
}

impl<T> Store for T where
    T: UserStore
        + ClientStore
        + BranchStore
        + EmployeeStore
        + AccountStore
        + TransactionStore
        + LoanStore
        + CreditCardStore
        + StatsStore
{
}

/// Case-insensitive substring match used by the search filters
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `%needle%` for ILIKE, with LIKE wildcards escaped
pub(crate) fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
