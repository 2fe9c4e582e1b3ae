//! Core module - configuration, state and server
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - shared services
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::{BootstrapAdmin, Config};
pub use server::Server;
pub use state::ServerState;
