//! Shared types for the resin catalog
//!
//! Data models, the unified error system, and the in-memory list
//! filtering engine used by every admin list view.

pub mod error;
pub mod filter;
pub mod models;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
