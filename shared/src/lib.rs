//! Shared types for the statistics service
//!
//! Error system, domain models, chart payloads and API DTOs used by
//! stat-server and its clients.

pub mod chart;
pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
