//! Loan model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::util::empty_as_none;

/// Accepted loan `status` values
pub const LOAN_STATUSES: &[&str] = &["Approved", "Paid", "Delinquent", "Cancelled"];

/// Loan entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Loan {
    pub id: i64,
    pub client_id: i64,
    /// Approving employee
    pub employee_id: i64,
    pub branch_id: i64,
    pub amount: f64,
    /// Annual rate in percent
    pub interest_rate: f64,
    pub term_months: i32,
    pub approved_on: NaiveDate,
    pub status: String,
}

/// Create/replace loan payload. Every field is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanCreate {
    pub client_id: i64,
    pub employee_id: i64,
    pub branch_id: i64,
    pub amount: f64,
    pub interest_rate: f64,
    pub term_months: i32,
    #[serde(default)]
    pub approved_on: Option<NaiveDate>,
    pub status: String,
}

pub type LoanUpdate = LoanCreate;

/// Loan search filters (exact matches)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub client_id: Option<i64>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub branch_id: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employee_id: Option<i64>,
}
