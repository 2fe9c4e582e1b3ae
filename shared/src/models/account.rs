//! Bank account model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::util::empty_as_none;

/// Accepted `account_type` values
pub const ACCOUNT_TYPES: &[&str] = &["Savings", "Checking", "FixedTerm"];

/// Accepted `status` values. Only `Active` accounts count as open.
pub const ACCOUNT_STATUSES: &[&str] = &["Active", "Inactive", "Blocked"];

/// Account entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Account {
    pub id: i64,
    pub client_id: i64,
    pub branch_id: i64,
    /// Employee who opened the account
    pub employee_id: i64,
    pub account_type: String,
    pub balance: f64,
    pub opened_on: NaiveDate,
    pub status: String,
}

/// Create/replace account payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountCreate {
    pub client_id: i64,
    pub branch_id: i64,
    pub employee_id: i64,
    pub account_type: String,
    /// Defaults to zero
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub opened_on: Option<NaiveDate>,
    pub status: String,
}

pub type AccountUpdate = AccountCreate;

/// Account search filters (exact matches)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub client_id: Option<i64>,
    pub account_type: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub branch_id: Option<i64>,
}
