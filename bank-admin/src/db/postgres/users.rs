use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::{User, UserQuery};

use super::{PgStore, filter_exact, filter_pattern};
use crate::db::{NewUser, StoreResult, UserChanges, UserStore};

const USER_COLUMNS: &str = "id, username, password_hash, role, employee_id, last_access";

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE username = $1");
        let user = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(self.pool())
            .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM app_user WHERE id = $1");
        let user = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(user)
    }

    async fn list(&self, query: &UserQuery) -> StoreResult<Vec<User>> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM app_user
             WHERE ($1::TEXT IS NULL OR username ILIKE $1)
               AND ($2::TEXT IS NULL OR role = $2)
               AND ($3::BIGINT IS NULL OR employee_id = $3)
             ORDER BY username"
        );
        let users = sqlx::query_as(&sql)
            .bind(filter_pattern(query.username.as_deref()))
            .bind(filter_exact(query.role.as_deref()))
            .bind(query.employee_id)
            .fetch_all(self.pool())
            .await?;
        Ok(users)
    }

    async fn username_taken(&self, username: &str, exclude_id: Option<i64>) -> StoreResult<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(
                SELECT 1 FROM app_user
                WHERE username = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )",
        )
        .bind(username)
        .bind(exclude_id)
        .fetch_one(self.pool())
        .await?;
        Ok(taken)
    }

    async fn create(&self, user: NewUser) -> StoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO app_user (username, password_hash, role, employee_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.role)
        .bind(user.employee_id)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE app_user
             SET username = $1,
                 role = $2,
                 employee_id = $3,
                 password_hash = COALESCE($4, password_hash)
             WHERE id = $5",
        )
        .bind(&changes.username)
        .bind(&changes.role)
        .bind(changes.employee_id)
        .bind(changes.password_hash.as_deref())
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM app_user WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn touch_last_access(&self, id: i64, at: DateTime<Utc>) -> StoreResult<()> {
        sqlx::query("UPDATE app_user SET last_access = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM app_user")
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}
