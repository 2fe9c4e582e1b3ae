//! Bank client model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::util::empty_as_none;

/// Client entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registered_on: NaiveDate,
}

/// Create/replace client payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientCreate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Defaults to today when absent
    #[serde(default)]
    pub registered_on: Option<NaiveDate>,
}

/// Client update payload (full replacement, same shape as create)
pub type ClientUpdate = ClientCreate;

/// Client search filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Inclusive lower bound on registration date
    #[serde(default, deserialize_with = "empty_as_none")]
    pub registered_from: Option<NaiveDate>,
    /// Inclusive upper bound on registration date
    #[serde(default, deserialize_with = "empty_as_none")]
    pub registered_to: Option<NaiveDate>,
}

/// Result of a create operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub id: i64,
}
