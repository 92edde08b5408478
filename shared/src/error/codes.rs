//! Unified error codes for the jar service
//!
//! This module defines all error codes used across the server and frontend.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Jar errors
//! - 5xxx: Suggestion errors
//! - 6xxx: Vote errors
//! - 8xxx: Member errors
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

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Member acting on a suggestion they do not own
    NotSuggestionOwner = 2002,

    // ==================== 4xxx: Jar ====================
    /// Jar not found
    JarNotFound = 4001,
    /// Operation attempted in the wrong phase
    InvalidPhase = 4002,
    /// Jar has been cancelled / deactivated
    JarInactive = 4003,
    /// Cannot start voting without any active suggestion
    NoActiveSuggestions = 4004,

    // ==================== 5xxx: Suggestion ====================
    /// Suggestion not found
    SuggestionNotFound = 5001,
    /// Member has reached the per-member suggestion quota
    SuggestionQuotaExceeded = 5002,
    /// Structured location input while the feature is disabled
    StructuredLocationDisabled = 5003,
    /// Structured location input missing latitude/longitude
    IncompleteCoordinates = 5004,

    // ==================== 6xxx: Vote ====================
    /// Allocated points exceed the voter's budget
    PointBudgetExceeded = 6001,
    /// Same suggestion referenced twice in one vote batch
    DuplicateVoteTarget = 6002,
    /// Vote batch references an unknown or inactive suggestion
    VoteTargetInvalid = 6003,
    /// Vote batch contains no entries
    EmptyVoteBatch = 6004,

    // ==================== 8xxx: Member ====================
    /// Member not found (in the jar)
    MemberNotFound = 8001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::NotSuggestionOwner => "You can only modify your own suggestions",

            // Jar
            ErrorCode::JarNotFound => "Jar not found",
            ErrorCode::InvalidPhase => "Operation not allowed in the current phase",
            ErrorCode::JarInactive => "Jar is no longer active",
            ErrorCode::NoActiveSuggestions => "Cannot start voting with no suggestions",

            // Suggestion
            ErrorCode::SuggestionNotFound => "Suggestion not found",
            ErrorCode::SuggestionQuotaExceeded => "Suggestion quota reached",
            ErrorCode::StructuredLocationDisabled => "Structured location is currently disabled",
            ErrorCode::IncompleteCoordinates => {
                "Latitude and longitude must be provided together"
            }

            // Vote
            ErrorCode::PointBudgetExceeded => "Allocated points exceed the allowed budget",
            ErrorCode::DuplicateVoteTarget => "Cannot vote on the same suggestion twice",
            ErrorCode::VoteTargetInvalid => "One or more suggestions not found or inactive",
            ErrorCode::EmptyVoteBatch => "Must provide at least one vote",

            // Member
            ErrorCode::MemberNotFound => "Member not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::NotSuggestionOwner),

            // Jar
            4001 => Ok(ErrorCode::JarNotFound),
            4002 => Ok(ErrorCode::InvalidPhase),
            4003 => Ok(ErrorCode::JarInactive),
            4004 => Ok(ErrorCode::NoActiveSuggestions),

            // Suggestion
            5001 => Ok(ErrorCode::SuggestionNotFound),
            5002 => Ok(ErrorCode::SuggestionQuotaExceeded),
            5003 => Ok(ErrorCode::StructuredLocationDisabled),
            5004 => Ok(ErrorCode::IncompleteCoordinates),

            // Vote
            6001 => Ok(ErrorCode::PointBudgetExceeded),
            6002 => Ok(ErrorCode::DuplicateVoteTarget),
            6003 => Ok(ErrorCode::VoteTargetInvalid),
            6004 => Ok(ErrorCode::EmptyVoteBatch),

            // Member
            8001 => Ok(ErrorCode::MemberNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
