//! Data models
//!
//! Shared between resin-admin and the admin front-end (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod product;
pub mod tag;

// Re-exports
pub use product::*;
pub use tag::*;
