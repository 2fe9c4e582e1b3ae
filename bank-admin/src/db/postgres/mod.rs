//! PostgreSQL stores
//!
//! Constraint violations surface as [`StoreError`](crate::db::StoreError)
//! variants through the `From<sqlx::Error>` conversion, so a concurrent
//! insert racing a handler's pre-check still maps to a business error.

mod accounts;
mod branches;
mod cards;
mod clients;
mod employees;
mod loans;
mod stats;
mod transactions;
mod users;

use sqlx::PgPool;

/// All stores over one connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Blank filters become NULL so the `($n IS NULL OR ...)` clauses skip them
fn filter_pattern(value: Option<&str>) -> Option<String> {
    shared::util::non_blank(value).map(super::like_pattern)
}

/// Exact-match filter, NULL when blank
fn filter_exact(value: Option<&str>) -> Option<&str> {
    shared::util::non_blank(value)
}
