//! Utilities - logging setup, request extractors, validation and the
//! service error bridge

pub mod error;
pub mod extract;
pub mod logger;
pub mod validation;

pub use error::{ApiResult, ServiceError, ServiceResult, delete_blocked};
pub use extract::{AppJson, AppPath, AppQuery};
pub use logger::init_logger;
