use async_trait::async_trait;
use shared::models::{Transaction, TransactionQuery};

use super::{PgStore, filter_exact};
use crate::db::{StoreResult, TransactionFields, TransactionStore};

const TRANSACTION_COLUMNS: &str =
    "id, account_id, employee_id, transaction_type, amount, occurred_at, description";

#[async_trait]
impl TransactionStore for PgStore {
    async fn list(&self, query: &TransactionQuery) -> StoreResult<Vec<Transaction>> {
        let sql = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM bank_transaction
             WHERE ($1::BIGINT IS NULL OR account_id = $1)
               AND ($2::TEXT IS NULL OR transaction_type = $2)
               AND ($3::BIGINT IS NULL OR employee_id = $3)
               AND ($4::DATE IS NULL OR occurred_at::DATE >= $4)
               AND ($5::DATE IS NULL OR occurred_at::DATE <= $5)
             ORDER BY occurred_at DESC, id DESC"
        );
        let transactions = sqlx::query_as(&sql)
            .bind(query.account_id)
            .bind(filter_exact(query.transaction_type.as_deref()))
            .bind(query.employee_id)
            .bind(query.from)
            .bind(query.to)
            .fetch_all(self.pool())
            .await?;
        Ok(transactions)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Transaction>> {
        let sql = format!("SELECT {TRANSACTION_COLUMNS} FROM bank_transaction WHERE id = $1");
        let transaction = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(transaction)
    }

    async fn create(&self, fields: TransactionFields) -> StoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO bank_transaction
                (account_id, employee_id, transaction_type, amount, occurred_at, description)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(fields.account_id)
        .bind(fields.employee_id)
        .bind(&fields.transaction_type)
        .bind(fields.amount)
        .bind(fields.occurred_at)
        .bind(&fields.description)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, fields: TransactionFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE bank_transaction
             SET account_id = $1, employee_id = $2, transaction_type = $3, amount = $4,
                 occurred_at = $5, description = $6
             WHERE id = $7",
        )
        .bind(fields.account_id)
        .bind(fields.employee_id)
        .bind(&fields.transaction_type)
        .bind(fields.amount)
        .bind(fields.occurred_at)
        .bind(&fields.description)
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM bank_transaction WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
