use async_trait::async_trait;
use shared::models::{CreditCard, CreditCardQuery};

use super::{PgStore, filter_exact};
use crate::db::{CreditCardFields, CreditCardStore, StoreResult};

const CARD_COLUMNS: &str = "id, account_id, client_id, card_type, number, credit_limit, \
                            issued_on, expires_on, status";

#[async_trait]
impl CreditCardStore for PgStore {
    async fn list(&self, query: &CreditCardQuery) -> StoreResult<Vec<CreditCard>> {
        let sql = format!(
            "SELECT {CARD_COLUMNS} FROM credit_card
             WHERE ($1::BIGINT IS NULL OR client_id = $1)
               AND ($2::TEXT IS NULL OR card_type = $2)
               AND ($3::TEXT IS NULL OR status = $3)
               AND ($4::BIGINT IS NULL OR account_id = $4)
             ORDER BY id"
        );
        let cards = sqlx::query_as(&sql)
            .bind(query.client_id)
            .bind(filter_exact(query.card_type.as_deref()))
            .bind(filter_exact(query.status.as_deref()))
            .bind(query.account_id)
            .fetch_all(self.pool())
            .await?;
        Ok(cards)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<CreditCard>> {
        let sql = format!("SELECT {CARD_COLUMNS} FROM credit_card WHERE id = $1");
        let card = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(card)
    }

    async fn create(&self, fields: CreditCardFields) -> StoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO credit_card
                (account_id, client_id, card_type, number, credit_limit, issued_on,
                 expires_on, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(fields.account_id)
        .bind(fields.client_id)
        .bind(&fields.card_type)
        .bind(&fields.number)
        .bind(fields.credit_limit)
        .bind(fields.issued_on)
        .bind(fields.expires_on)
        .bind(&fields.status)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, fields: CreditCardFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE credit_card
             SET account_id = $1, client_id = $2, card_type = $3, number = $4,
                 credit_limit = $5, issued_on = $6, expires_on = $7, status = $8
             WHERE id = $9",
        )
        .bind(fields.account_id)
        .bind(fields.client_id)
        .bind(&fields.card_type)
        .bind(&fields.number)
        .bind(fields.credit_limit)
        .bind(fields.issued_on)
        .bind(fields.expires_on)
        .bind(&fields.status)
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM credit_card WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
