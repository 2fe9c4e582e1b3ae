use async_trait::async_trait;
use shared::models::{Client, ClientQuery};

use super::{PgStore, filter_pattern};
use crate::db::{ClientFields, ClientStore, StoreResult};

#[async_trait]
impl ClientStore for PgStore {
    async fn list(&self, query: &ClientQuery) -> StoreResult<Vec<Client>> {
        let clients = sqlx::query_as(
            "SELECT id, first_name, last_name, address, phone, email, registered_on
             FROM client
             WHERE ($1::TEXT IS NULL OR first_name ILIKE $1)
               AND ($2::TEXT IS NULL OR last_name ILIKE $2)
               AND ($3::TEXT IS NULL OR email ILIKE $3)
               AND ($4::DATE IS NULL OR registered_on >= $4)
               AND ($5::DATE IS NULL OR registered_on <= $5)
             ORDER BY last_name, first_name",
        )
        .bind(filter_pattern(query.first_name.as_deref()))
        .bind(filter_pattern(query.last_name.as_deref()))
        .bind(filter_pattern(query.email.as_deref()))
        .bind(query.registered_from)
        .bind(query.registered_to)
        .fetch_all(self.pool())
        .await?;
        Ok(clients)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Client>> {
        let client = sqlx::query_as(
            "SELECT id, first_name, last_name, address, phone, email, registered_on
             FROM client WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;
        Ok(client)
    }

    async fn create(&self, fields: ClientFields) -> StoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO client (first_name, last_name, address, phone, email, registered_on)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.address)
        .bind(&fields.phone)
        .bind(&fields.email)
        .bind(fields.registered_on)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, fields: ClientFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE client
             SET first_name = $1, last_name = $2, address = $3, phone = $4,
                 email = $5, registered_on = $6
             WHERE id = $7",
        )
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.address)
        .bind(&fields.phone)
        .bind(&fields.email)
        .bind(fields.registered_on)
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM client WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn account_count(&self, client_id: i64) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account WHERE client_id = $1")
            .bind(client_id)
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}
