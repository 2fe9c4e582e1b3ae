//! Credit card model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::util::empty_as_none;

/// Accepted `card_type` values
pub const CARD_TYPES: &[&str] = &["Classic", "Gold", "Platinum", "Black"];

/// Accepted card `status` values
pub const CARD_STATUSES: &[&str] = &["Active", "Blocked", "Cancelled"];

/// Credit card entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CreditCard {
    pub id: i64,
    /// Account the card settles against
    pub account_id: i64,
    pub client_id: i64,
    pub card_type: String,
    /// 16 digits
    pub number: String,
    pub credit_limit: f64,
    pub issued_on: NaiveDate,
    pub expires_on: NaiveDate,
    pub status: String,
}

/// Create/replace credit card payload. Every field is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditCardCreate {
    pub account_id: i64,
    pub client_id: i64,
    pub card_type: String,
    pub number: String,
    pub credit_limit: f64,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
    #[serde(default)]
    pub expires_on: Option<NaiveDate>,
    pub status: String,
}

pub type CreditCardUpdate = CreditCardCreate;

/// Credit card search filters (exact matches)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditCardQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub client_id: Option<i64>,
    pub card_type: Option<String>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub account_id: Option<i64>,
}
