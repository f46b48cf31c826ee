//! Errors shared by the server and its clients
//!
//! Handlers return [`AppError`]; axum renders it as [`ErrorBody`] with the
//! status from [`ErrorCode::http_status`].
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::required("name");
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, ErrorCode::RequiredField.code());
//! assert_eq!(body.error, "name is required");
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
