//! Numeric error codes
//!
//! The leading digit selects the [`ErrorCategory`](super::ErrorCategory):
//! 0 general, 1 auth, 2 catalog, 3 review request, 4 internal feedback,
//! 5 analytics, 9 system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code sent to clients as a bare number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // 0xxx
    Success = 0,
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,
    InvalidRequest = 5,
    RequiredField = 7,
    TooManyRequests = 9,

    // 1xxx
    NotAuthenticated = 1001,
    InvalidCredentials = 1002,
    TokenExpired = 1003,
    TokenInvalid = 1004,

    // 2xxx
    ServerNotFound = 2001,
    ServerNameExists = 2002,
    MenuOptionNotFound = 2101,

    // 3xxx
    /// Neither review tags nor a private note
    EmptyReviewRequest = 3001,

    // 4xxx
    FeedbackNotFound = 4001,
    InvalidFeedbackStatus = 4002,
    /// Feedback status may only move forward
    InvalidStatusTransition = 4003,

    // 5xxx
    InvalidPeriod = 5001,

    // 9xxx
    InternalError = 9001,
    DatabaseError = 9002,
    /// Language-model call failed or returned nothing
    GenerationFailed = 9003,
    ConfigError = 9005,
}

impl ErrorCode {
    /// Every variant, in code order
    pub const ALL: [ErrorCode; 24] = [
        Self::Success,
        Self::Unknown,
        Self::ValidationFailed,
        Self::NotFound,
        Self::AlreadyExists,
        Self::InvalidRequest,
        Self::RequiredField,
        Self::TooManyRequests,
        Self::NotAuthenticated,
        Self::InvalidCredentials,
        Self::TokenExpired,
        Self::TokenInvalid,
        Self::ServerNotFound,
        Self::ServerNameExists,
        Self::MenuOptionNotFound,
        Self::EmptyReviewRequest,
        Self::FeedbackNotFound,
        Self::InvalidFeedbackStatus,
        Self::InvalidStatusTransition,
        Self::InvalidPeriod,
        Self::InternalError,
        Self::DatabaseError,
        Self::GenerationFailed,
        Self::ConfigError,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Stock message, used when no more specific one is given
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::Unknown => "An unknown error occurred",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::RequiredField => "Required field is missing",
            Self::TooManyRequests => "Too many requests, try again later",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid username or password",
            Self::TokenExpired => "Session expired, please log in again",
            Self::TokenInvalid => "Invalid session token",

            Self::ServerNotFound => "Server not found",
            Self::ServerNameExists => "A server with this name already exists",
            Self::MenuOptionNotFound => "Menu option not found",

            Self::EmptyReviewRequest => "Select at least one tag or leave a comment",

            Self::FeedbackNotFound => "Feedback not found",
            Self::InvalidFeedbackStatus => "Status must be one of: new, read, archived",
            Self::InvalidStatusTransition => "Status change not allowed",

            Self::InvalidPeriod => "Period must be one of: 7, 30, all",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::GenerationFailed => "Review generation failed",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number that is not an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}
