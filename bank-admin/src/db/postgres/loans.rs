use async_trait::async_trait;
use shared::models::{Loan, LoanQuery};

use super::{PgStore, filter_exact};
use crate::db::{LoanFields, LoanStore, StoreResult};

const LOAN_COLUMNS: &str = "id, client_id, employee_id, branch_id, amount, interest_rate, \
                            term_months, approved_on, status";

#[async_trait]
impl LoanStore for PgStore {
    async fn list(&self, query: &LoanQuery) -> StoreResult<Vec<Loan>> {
        let sql = format!(
            "SELECT {LOAN_COLUMNS} FROM loan
             WHERE ($1::BIGINT IS NULL OR client_id = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::BIGINT IS NULL OR branch_id = $3)
               AND ($4::BIGINT IS NULL OR employee_id = $4)
             ORDER BY approved_on DESC, id DESC"
        );
        let loans = sqlx::query_as(&sql)
            .bind(query.client_id)
            .bind(filter_exact(query.status.as_deref()))
            .bind(query.branch_id)
            .bind(query.employee_id)
            .fetch_all(self.pool())
            .await?;
        Ok(loans)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Loan>> {
        let sql = format!("SELECT {LOAN_COLUMNS} FROM loan WHERE id = $1");
        let loan = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(loan)
    }

    async fn create(&self, fields: LoanFields) -> StoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO loan
                (client_id, employee_id, branch_id, amount, interest_rate, term_months,
                 approved_on, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(fields.client_id)
        .bind(fields.employee_id)
        .bind(fields.branch_id)
        .bind(fields.amount)
        .bind(fields.interest_rate)
        .bind(fields.term_months)
        .bind(fields.approved_on)
        .bind(&fields.status)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, fields: LoanFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE loan
             SET client_id = $1, employee_id = $2, branch_id = $3, amount = $4,
                 interest_rate = $5, term_months = $6, approved_on = $7, status = $8
             WHERE id = $9",
        )
        .bind(fields.client_id)
        .bind(fields.employee_id)
        .bind(fields.branch_id)
        .bind(fields.amount)
        .bind(fields.interest_rate)
        .bind(fields.term_months)
        .bind(fields.approved_on)
        .bind(&fields.status)
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM loan WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
