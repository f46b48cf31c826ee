//! ErrorCode -> HTTP status

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Status sent with this code; anything not listed is a 400
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;

        match self {
            Success => StatusCode::OK,
            NotFound | ServerNotFound | MenuOptionNotFound | FeedbackNotFound => {
                StatusCode::NOT_FOUND
            }
            AlreadyExists | ServerNameExists => StatusCode::CONFLICT,
            NotAuthenticated | InvalidCredentials | TokenExpired | TokenInvalid => {
                StatusCode::UNAUTHORIZED
            }
            TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Unknown | InternalError | DatabaseError | GenerationFailed | ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
