use async_trait::async_trait;
use shared::models::{Account, AccountQuery};

use super::{PgStore, filter_exact};
use crate::db::{AccountFields, AccountStore, StoreResult};

const ACCOUNT_COLUMNS: &str =
    "id, client_id, branch_id, employee_id, account_type, balance, opened_on, status";

#[async_trait]
impl AccountStore for PgStore {
    async fn list(&self, query: &AccountQuery) -> StoreResult<Vec<Account>> {
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account
             WHERE ($1::BIGINT IS NULL OR client_id = $1)
               AND ($2::TEXT IS NULL OR account_type = $2)
               AND ($3::TEXT IS NULL OR status = $3)
               AND ($4::BIGINT IS NULL OR branch_id = $4)
             ORDER BY id"
        );
        let accounts = sqlx::query_as(&sql)
            .bind(query.client_id)
            .bind(filter_exact(query.account_type.as_deref()))
            .bind(filter_exact(query.status.as_deref()))
            .bind(query.branch_id)
            .fetch_all(self.pool())
            .await?;
        Ok(accounts)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Account>> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = $1");
        let account = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(account)
    }

    async fn create(&self, fields: AccountFields) -> StoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO account
                (client_id, branch_id, employee_id, account_type, balance, opened_on, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(fields.client_id)
        .bind(fields.branch_id)
        .bind(fields.employee_id)
        .bind(&fields.account_type)
        .bind(fields.balance)
        .bind(fields.opened_on)
        .bind(&fields.status)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, fields: AccountFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE account
             SET client_id = $1, branch_id = $2, employee_id = $3, account_type = $4,
                 balance = $5, opened_on = $6, status = $7
             WHERE id = $8",
        )
        .bind(fields.client_id)
        .bind(fields.branch_id)
        .bind(fields.employee_id)
        .bind(&fields.account_type)
        .bind(fields.balance)
        .bind(fields.opened_on)
        .bind(&fields.status)
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn transaction_count(&self, account_id: i64) -> StoreResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM bank_transaction WHERE account_id = $1")
                .bind(account_id)
                .fetch_one(self.pool())
                .await?;
        Ok(count)
    }
}
