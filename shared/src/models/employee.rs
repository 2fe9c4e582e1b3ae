//! Bank employee model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::util::empty_as_none;

/// Employee entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    /// Branch the employee works at, if assigned
    pub branch_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub hired_on: NaiveDate,
}

/// Create/replace employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    #[serde(default)]
    pub branch_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub position: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hired_on: Option<NaiveDate>,
}

pub type EmployeeUpdate = EmployeeCreate;

/// Employee search filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub branch_id: Option<i64>,
}
