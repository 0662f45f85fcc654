//! Unified error codes for the Lokma marketplace core
//!
//! This module defines all error codes used across the core layer and the
//! API surface in front of it. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 4xxx: Order errors
//! - 5xxx: Rating errors
//! - 6xxx: Profile errors
//! - 7xxx: Restaurant errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,

    // ==================== 5xxx: Rating ====================
    /// Rating not found
    RatingNotFound = 5001,
    /// A rating already exists for this order
    RatingAlreadyExists = 5002,
    /// Rating value outside the 1-5 range
    RatingValueOutOfRange = 5003,
    /// Rating carries more than one photo attachment
    RatingTooManyPhotos = 5004,
    /// Rating comment exceeds the allowed length
    RatingCommentTooLong = 5005,
    /// Rating can no longer be edited by its author
    RatingEditWindowClosed = 5006,

    // ==================== 6xxx: Profile ====================
    /// Profile not found
    ProfileNotFound = 6001,

    // ==================== 7xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 7001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Not authenticated",

            Self::OrderNotFound => "Order not found",

            Self::RatingNotFound => "Rating not found",
            Self::RatingAlreadyExists => "A rating already exists for this order",
            Self::RatingValueOutOfRange => "Rating value must be between 1 and 5",
            Self::RatingTooManyPhotos => "A rating can carry at most one photo",
            Self::RatingCommentTooLong => "Rating comment is too long",
            Self::RatingEditWindowClosed => "Rating can no longer be edited",

            Self::ProfileNotFound => "Profile not found",

            Self::RestaurantNotFound => "Restaurant not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.message())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,

            4001 => Self::OrderNotFound,

            5001 => Self::RatingNotFound,
            5002 => Self::RatingAlreadyExists,
            5003 => Self::RatingValueOutOfRange,
            5004 => Self::RatingTooManyPhotos,
            5005 => Self::RatingCommentTooLong,
            5006 => Self::RatingEditWindowClosed,

            6001 => Self::ProfileNotFound,

            7001 => Self::RestaurantNotFound,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,

            _ => return Err(format!("Unknown error code: {}", value)),
        };
        Ok(code)
    }
}
