//! Account transaction model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::util::empty_as_none;

/// Accepted `transaction_type` values
pub const TRANSACTION_TYPES: &[&str] = &["Deposit", "Withdrawal", "Transfer"];

/// Transaction entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    /// Employee who registered it, if any
    pub employee_id: Option<i64>,
    pub transaction_type: String,
    pub amount: f64,
    pub occurred_at: DateTime<Utc>,
    pub description: Option<String>,
}

/// Create/replace transaction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub account_id: i64,
    #[serde(default)]
    pub employee_id: Option<i64>,
    pub transaction_type: String,
    pub amount: f64,
    /// Defaults to now
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

pub type TransactionUpdate = TransactionCreate;

/// Transaction search filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub account_id: Option<i64>,
    pub transaction_type: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employee_id: Option<i64>,
    /// Inclusive lower bound on the transaction date
    #[serde(default, deserialize_with = "empty_as_none")]
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the transaction date
    #[serde(default, deserialize_with = "empty_as_none")]
    pub to: Option<NaiveDate>,
}
