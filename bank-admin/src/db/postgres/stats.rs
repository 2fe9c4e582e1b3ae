use async_trait::async_trait;
use shared::models::DashboardStats;

use super::PgStore;
use crate::db::{StatsStore, StoreResult};

#[async_trait]
impl StatsStore for PgStore {
    async fn dashboard_stats(&self) -> StoreResult<DashboardStats> {
        let stats = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM client) AS clients,
                (SELECT COUNT(*) FROM account WHERE status = 'Active') AS active_accounts,
                (SELECT COUNT(*) FROM employee) AS employees,
                (SELECT COUNT(*) FROM branch) AS branches",
        )
        .fetch_one(self.pool())
        .await?;
        Ok(stats)
    }
}
