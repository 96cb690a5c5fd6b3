//! Repository Module
//!
//! Free functions over SQLite executors, one module per table. Reads take any
//! executor; multi-statement writes take a connection so the caller can run
//! them inside its own transaction.

pub mod product;
pub mod product_tag;
pub mod tag;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
///
/// Conflicts and validation failures carry the catalog error code and the
/// form field they concern, so the admin form can highlight it.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {message}")]
    NotFound { code: ErrorCode, message: String },

    #[error("Duplicate {field}: {message}")]
    Duplicate {
        code: ErrorCode,
        field: String,
        message: String,
    },

    /// Referenced tags that are unknown or inactive, sorted and deduplicated
    #[error("Invalid tag reference: {0:?}")]
    InvalidTagReference(Vec<i64>),

    #[error("Validation error on {field}: {message}")]
    Validation {
        code: ErrorCode,
        field: String,
        message: String,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    pub fn tag_not_found(id: i64) -> Self {
        RepoError::NotFound {
            code: ErrorCode::TagNotFound,
            message: format!("Tag {} not found", id),
        }
    }

    pub fn tag_slug_not_found(slug: &str) -> Self {
        RepoError::NotFound {
            code: ErrorCode::TagNotFound,
            message: format!("Tag '{}' not found", slug),
        }
    }

    pub fn product_not_found(id: i64) -> Self {
        RepoError::NotFound {
            code: ErrorCode::ProductNotFound,
            message: format!("Product {} not found", id),
        }
    }

    pub fn duplicate(code: ErrorCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        RepoError::Duplicate {
            code,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn validation(code: ErrorCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        RepoError::Validation {
            code,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Form field an error is about, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            RepoError::Duplicate { field, .. } | RepoError::Validation { field, .. } => {
                Some(field.as_str())
            }
            RepoError::InvalidTagReference(_) => Some("tags"),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                unique_violation(db_err.message())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Map SQLite's `UNIQUE constraint failed: table.column` to a conflict
fn unique_violation(message: &str) -> RepoError {
    let target = message.rsplit(": ").next().unwrap_or_default();
    let (table, column) = target.split_once('.').unwrap_or(("", target));
    let code = match (table, column) {
        ("tag", "name") => ErrorCode::TagNameExists,
        ("tag", "slug") => ErrorCode::TagSlugExists,
        ("product", "slug") => ErrorCode::ProductSlugExists,
        ("product", "sku") => ErrorCode::ProductSkuExists,
        _ => ErrorCode::AlreadyExists,
    };
    RepoError::duplicate(code, column, message)
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { code, message } => AppError::with_message(code, message),
            RepoError::Duplicate {
                code,
                field,
                message,
            }
            | RepoError::Validation {
                code,
                field,
                message,
            } => AppError::with_message(code, message).with_detail("field", field),
            RepoError::InvalidTagReference(ids) => AppError::invalid_tag_reference(&ids),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
