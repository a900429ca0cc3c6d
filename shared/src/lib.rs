//! Shared types for BRMS
//!
//! Domain models, error types, response structures and the pure checkout
//! money helpers used by the service and its tests.

pub mod checkout;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
