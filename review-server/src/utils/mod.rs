//! Utilities
//!
//! - [`logger`] - tracing subscriber setup

pub mod logger;

// Error types come from the shared crate
pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode};
