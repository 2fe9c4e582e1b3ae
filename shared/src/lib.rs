//! Shared types for the bank back-office
//!
//! Error types, response structures, and the data models exchanged between
//! the server and its clients.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use serde::{Deserialize, Serialize};
