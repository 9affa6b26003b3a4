//! Type-safe error codes for API responses.
//!
//! This module provides a single source of truth for error codes used across
//! the application. Each error code includes:
//! - String representation for client consumption (e.g., "NOT_FOUND")
//! - Integer code for logging and monitoring (e.g., 1004)
//! - Default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::NotFound;
//! assert_eq!(code.as_str(), "NOT_FOUND");
//! assert_eq!(code.code(), 1004);
//! assert_eq!(code.default_message(), "Resource not found");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
///
/// Combines string identifiers (for clients), integer codes (for monitoring),
/// and default messages (for consistency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request parameters could not be interpreted
    BadRequest,

    /// Requested resource was not found
    NotFound,

    /// An unexpected internal server error occurred
    InternalError,

    /// Service is temporarily unavailable
    ServiceUnavailable,

    // Database errors (2000-2999)
    /// Database query returned no results
    DatabaseNotFound,

    /// Database connection or query error
    DatabaseError,

    /// Database connection pool timed out
    DatabasePoolTimeout,

    // Migration errors (3000s)
    /// Database migration failed
    MigrationError,

    // I/O errors (4000s)
    /// File system I/O error
    IoError,

    // JSON parsing errors (5000s)
    /// JSON serialization/deserialization error
    SerdeJsonError,
}

impl ErrorCode {
    /// Get the string representation for client consumption.
    ///
    /// Returns a SCREAMING_SNAKE_CASE identifier that clients can use to
    /// programmatically handle specific error types.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseNotFound => "DATABASE_NOT_FOUND",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabasePoolTimeout => "DATABASE_POOL_TIMEOUT",
            Self::MigrationError => "MIGRATION_ERROR",
            Self::IoError => "IO_ERROR",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
        }
    }

    /// Get the integer code for logging and monitoring.
    ///
    /// The codes are organized into ranges:
    /// - 1000-1999: Client errors
    /// - 2000-2999: Database errors
    /// - 3000-3999: Migration errors
    /// - 4000-4999: I/O errors
    /// - 5000-5999: Serialization errors
    pub fn code(&self) -> i32 {
        match self {
            // Client errors (1000-1999)
            Self::BadRequest => 1001,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::ServiceUnavailable => 1011,

            // Database errors (2000-2999)
            Self::DatabaseNotFound => 2001,
            Self::DatabaseError => 2003,
            Self::DatabasePoolTimeout => 2013,

            // Migration errors (3000s)
            Self::MigrationError => 3001,

            // I/O errors (4000s)
            Self::IoError => 4001,

            // JSON parsing errors (5000s)
            Self::SerdeJsonError => 5001,
        }
    }

    /// Get the default user-facing error message.
    ///
    /// Individual handlers can override these messages with more specific
    /// details.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::BadRequest => "Request could not be interpreted",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseNotFound => "Database record not found",
            Self::DatabaseError => "Database error occurred",
            Self::DatabasePoolTimeout => "Database connection pool timed out",
            Self::MigrationError => "Migration error",
            Self::IoError => "I/O error occurred",
            Self::SerdeJsonError => "JSON serialization error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::DatabaseError.as_str(), "DATABASE_ERROR");
    }

    #[test]
    fn test_error_code_ranges() {
        assert!(ErrorCode::BadRequest.code() < 2000);
        assert!(ErrorCode::DatabaseError.code() >= 2000);
        assert!(ErrorCode::DatabaseError.code() < 3000);
        assert_eq!(ErrorCode::MigrationError.code(), 3001);
    }

    #[test]
    fn test_default_messages_are_not_empty() {
        for code in [
            ErrorCode::BadRequest,
            ErrorCode::NotFound,
            ErrorCode::InternalError,
            ErrorCode::ServiceUnavailable,
            ErrorCode::DatabaseNotFound,
            ErrorCode::DatabaseError,
            ErrorCode::DatabasePoolTimeout,
            ErrorCode::MigrationError,
            ErrorCode::IoError,
            ErrorCode::SerdeJsonError,
        ] {
            assert!(!code.default_message().is_empty());
        }
    }
}
