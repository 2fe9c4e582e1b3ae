//! Dashboard (landing page) model

use serde::{Deserialize, Serialize};

use super::role::{ActionSet, ResourceType};
use super::user::UserInfo;

/// One menu entry: a resource the role may read, with everything it may do there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub resource: ResourceType,
    pub actions: ActionSet,
}

/// Headline counters shown on the landing page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DashboardStats {
    pub clients: i64,
    pub active_accounts: i64,
    pub employees: i64,
    pub branches: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub user: UserInfo,
    pub menu: Vec<MenuEntry>,
    pub stats: DashboardStats,
}
