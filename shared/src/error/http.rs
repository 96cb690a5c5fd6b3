//! HTTP status code mapping for error codes
//!
//! The admin layer renders validation-style failures as form-field errors,
//! so uniqueness and reference failures map to 422 rather than 409.

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound | Self::ProductNotFound | Self::TagNotFound => StatusCode::NOT_FOUND,

            // 422 Unprocessable Entity
            Self::ValidationFailed
            | Self::AlreadyExists
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::ProductSlugExists
            | Self::ProductSkuExists
            | Self::TagNameExists
            | Self::TagSlugExists
            | Self::InvalidTagReference
            | Self::TagSlugInvalid => StatusCode::UNPROCESSABLE_ENTITY,

            // 400 Bad Request
            Self::InvalidRequest => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            Self::Unknown | Self::InternalError | Self::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
