use async_trait::async_trait;
use shared::models::{Branch, BranchQuery};

use super::{PgStore, filter_pattern};
use crate::db::{BranchFields, BranchStore, StoreResult};

#[async_trait]
impl BranchStore for PgStore {
    async fn list(&self, query: &BranchQuery) -> StoreResult<Vec<Branch>> {
        let branches = sqlx::query_as(
            "SELECT id, name, address, phone, opened_on
             FROM branch
             WHERE ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR address ILIKE $2)
             ORDER BY name",
        )
        .bind(filter_pattern(query.name.as_deref()))
        .bind(filter_pattern(query.address.as_deref()))
        .fetch_all(self.pool())
        .await?;
        Ok(branches)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Branch>> {
        let branch = sqlx::query_as("SELECT id, name, address, phone, opened_on FROM branch WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(branch)
    }

    async fn create(&self, fields: BranchFields) -> StoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO branch (name, address, phone, opened_on)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&fields.name)
        .bind(&fields.address)
        .bind(&fields.phone)
        .bind(fields.opened_on)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, fields: BranchFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE branch SET name = $1, address = $2, phone = $3, opened_on = $4
             WHERE id = $5",
        )
        .bind(&fields.name)
        .bind(&fields.address)
        .bind(&fields.phone)
        .bind(fields.opened_on)
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM branch WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn employee_count(&self, branch_id: i64) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employee WHERE branch_id = $1")
            .bind(branch_id)
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}
