use async_trait::async_trait;
use shared::models::{Employee, EmployeeQuery};

use super::{PgStore, filter_pattern};
use crate::db::{EmployeeFields, EmployeeStore, StoreResult};

const EMPLOYEE_COLUMNS: &str =
    "id, branch_id, first_name, last_name, position, phone, email, hired_on";

#[async_trait]
impl EmployeeStore for PgStore {
    async fn list(&self, query: &EmployeeQuery) -> StoreResult<Vec<Employee>> {
        let sql = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employee
             WHERE ($1::TEXT IS NULL OR first_name ILIKE $1)
               AND ($2::TEXT IS NULL OR last_name ILIKE $2)
               AND ($3::TEXT IS NULL OR position ILIKE $3)
               AND ($4::BIGINT IS NULL OR branch_id = $4)
             ORDER BY last_name, first_name"
        );
        let employees = sqlx::query_as(&sql)
            .bind(filter_pattern(query.first_name.as_deref()))
            .bind(filter_pattern(query.last_name.as_deref()))
            .bind(filter_pattern(query.position.as_deref()))
            .bind(query.branch_id)
            .fetch_all(self.pool())
            .await?;
        Ok(employees)
    }

    async fn find(&self, id: i64) -> StoreResult<Option<Employee>> {
        let sql = format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = $1");
        let employee = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(employee)
    }

    async fn create(&self, fields: EmployeeFields) -> StoreResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO employee (branch_id, first_name, last_name, position, phone, email, hired_on)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(fields.branch_id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.position)
        .bind(&fields.phone)
        .bind(&fields.email)
        .bind(fields.hired_on)
        .fetch_one(self.pool())
        .await?;
        Ok(id)
    }

    async fn update(&self, id: i64, fields: EmployeeFields) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE employee
             SET branch_id = $1, first_name = $2, last_name = $3, position = $4,
                 phone = $5, email = $6, hired_on = $7
             WHERE id = $8",
        )
        .bind(fields.branch_id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.position)
        .bind(&fields.phone)
        .bind(&fields.email)
        .bind(fields.hired_on)
        .bind(id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM employee WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn account_count(&self, employee_id: i64) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account WHERE employee_id = $1")
            .bind(employee_id)
            .fetch_one(self.pool())
            .await?;
        Ok(count)
    }
}
