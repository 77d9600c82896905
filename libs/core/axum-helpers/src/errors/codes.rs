//! Type-safe error codes for API responses.
//!
//! Each code carries:
//! - a string identifier for clients (e.g., "VALIDATION_ERROR")
//! - an integer code for logs and monitoring (e.g., 1001)
//! - a default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Malformed document identifier in path or body
    InvalidId,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with current resource state (e.g., duplicate name)
    Conflict,

    /// Query string could not be deserialized
    InvalidQuery,

    /// Multipart form could not be read
    InvalidMultipart,

    /// Request body exceeds the configured limit
    PayloadTooLarge,

    // Server errors
    /// An unexpected internal server error occurred
    InternalError,

    // Database errors (2000-2999)
    /// Database command failed
    DatabaseError,

    /// No database server could be selected
    DatabaseUnavailable,

    /// Write rejected by a unique index
    DatabaseDuplicateKey,

    /// Stored document did not match the expected shape
    DatabaseDecode,

    // I/O errors (4000s)
    /// File system I/O error
    IoError,
}

impl ErrorCode {
    /// Get the string representation for client consumption.
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::InvalidId.as_str(), "INVALID_ID");
    /// assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::InvalidMultipart => "INVALID_MULTIPART",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::InternalError => "INTERNAL_ERROR",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
            Self::DatabaseDuplicateKey => "DATABASE_DUPLICATE_KEY",
            Self::DatabaseDecode => "DATABASE_DECODE",
            Self::IoError => "IO_ERROR",
        }
    }

    /// Get the integer code for logging and monitoring.
    ///
    /// Ranges:
    /// - 1000-1999: Client errors
    /// - 2000-2999: Database errors
    /// - 4000-4999: I/O errors
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::ValidationError.code(), 1001);
    /// assert_eq!(ErrorCode::DatabaseError.code(), 2001);
    /// ```
    pub fn code(&self) -> i32 {
        match self {
            // Client errors (1000-1999)
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::InvalidMultipart => 1012,
            Self::PayloadTooLarge => 1013,
            Self::InvalidQuery => 1014,

            // Database errors (2000-2999)
            Self::DatabaseError => 2001,
            Self::DatabaseUnavailable => 2002,
            Self::DatabaseDuplicateKey => 2003,
            Self::DatabaseDecode => 2004,

            // I/O errors (4000s)
            Self::IoError => 4001,
        }
    }

    /// Get the default user-facing error message.
    ///
    /// Handlers can override these with more specific details.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidId => "Invalid identifier format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::InvalidQuery => "Invalid query string",
            Self::InvalidMultipart => "Failed to read multipart form",
            Self::PayloadTooLarge => "Request body is too large",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database error occurred",
            Self::DatabaseUnavailable => "Database is unavailable",
            Self::DatabaseDuplicateKey => "Resource already exists",
            Self::DatabaseDecode => "Failed to decode stored document",
            Self::IoError => "I/O error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
