//! Data models
//!
//! Shared between bank-admin and its frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGINT). Amounts are `f64`.

pub mod account;
pub mod branch;
pub mod client;
pub mod credit_card;
pub mod dashboard;
pub mod employee;
pub mod loan;
pub mod role;
pub mod transaction;
pub mod user;

// Re-exports
pub use account::*;
pub use branch::*;
pub use client::*;
pub use credit_card::*;
pub use dashboard::*;
pub use employee::*;
pub use loan::*;
pub use role::*;
pub use transaction::*;
pub use user::*;
