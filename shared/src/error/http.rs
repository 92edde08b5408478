//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::JarNotFound
            | Self::SuggestionNotFound
            | Self::MemberNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict - phase/state conflicts
            Self::AlreadyExists | Self::InvalidPhase => StatusCode::CONFLICT,

            // 403 Forbidden
            Self::PermissionDenied | Self::NotSuggestionOwner => StatusCode::FORBIDDEN,

            // 422 Unprocessable Entity - business rule violations
            Self::SuggestionQuotaExceeded | Self::PointBudgetExceeded => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 400 Bad Request - validation and malformed input
            Self::Unknown
            | Self::ValidationFailed
            | Self::InvalidRequest
            | Self::InvalidFormat
            | Self::RequiredField
            | Self::ValueOutOfRange
            | Self::JarInactive
            | Self::NoActiveSuggestions
            | Self::StructuredLocationDisabled
            | Self::IncompleteCoordinates
            | Self::DuplicateVoteTarget
            | Self::VoteTargetInvalid
            | Self::EmptyVoteBatch => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(ErrorCode::Success.http_status(), StatusCode::OK);
        assert_eq!(ErrorCode::JarNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::InvalidPhase.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::NotSuggestionOwner.http_status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ErrorCode::PointBudgetExceeded.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::DuplicateVoteTarget.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
