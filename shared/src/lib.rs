//! Shared types for the Lokma marketplace core
//!
//! Wire-contract models and the unified error system used by the
//! normalization layer and every consumer that sits in front of it
//! (API responses, push/event notifications, background jobs).

pub mod error;
pub mod models;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
