//! System user (login account) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::empty_as_none;

/// User row as stored. The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Raw role token as stored
    pub role: String,
    /// Linked employee, if any
    pub employee_id: Option<i64>,
    pub last_access: Option<DateTime<Utc>>,
}

/// User as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub role_display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_access: Option<DateTime<Utc>>,
}

/// Create user payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub employee_id: Option<i64>,
}

/// Update user payload. An empty or missing password keeps the current one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub username: String,
    #[serde(default)]
    pub password: Option<String>,
    pub role: String,
    #[serde(default)]
    pub employee_id: Option<i64>,
}

/// User search filters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserQuery {
    /// Substring match on username
    pub username: Option<String>,
    /// Exact role token
    pub role: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub employee_id: Option<i64>,
}
