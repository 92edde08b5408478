//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 2xxx: Permission errors
/// - 4xxx: Jar errors
/// - 5xxx: Suggestion errors
/// - 6xxx: Vote errors
/// - 8xxx: Member errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Permission errors (2xxx)
    Permission,
    /// Jar errors (4xxx)
    Jar,
    /// Suggestion errors (5xxx)
    Suggestion,
    /// Vote errors (6xxx)
    Vote,
    /// Member errors (8xxx)
    Member,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            2000..3000 => Self::Permission,
            4000..5000 => Self::Jar,
            5000..6000 => Self::Suggestion,
            6000..7000 => Self::Vote,
            8000..9000 => Self::Member,
            9000.. => Self::System,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Permission => "permission",
            Self::Jar => "jar",
            Self::Suggestion => "suggestion",
            Self::Vote => "vote",
            Self::Member => "member",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
