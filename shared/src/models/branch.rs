//! Bank branch model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Branch entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub opened_on: NaiveDate,
}

/// Create/replace branch payload. Every field is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCreate {
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub opened_on: Option<NaiveDate>,
}

pub type BranchUpdate = BranchCreate;

/// Branch search filters (substring matches)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchQuery {
    pub name: Option<String>,
    pub address: Option<String>,
}
