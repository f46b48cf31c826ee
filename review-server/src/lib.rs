//! Review server: AI-written customer reviews and a staff dashboard
//!
//! # Module layout
//!
//! ```text
//! review-server/src/
//! ├── core/     # config, state, HTTP server
//! ├── auth/     # Basic + JWT admin guard, rate limiting
//! ├── api/      # routes and handlers
//! ├── review/   # prompt builder, language-model client
//! ├── db/       # SQLite pool, migrations, repositories
//! └── utils/    # logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod review;
pub mod utils;

pub use crate::core::{AppState, Config, Server};
pub use review::{GenerationError, ReviewGenerator, ReviewPrompt};
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResult, ErrorCode};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        match $level {
            "WARN" => tracing::warn!(
                target: "security",
                event = $event,
                $($key = $value),*
            ),
            _ => tracing::info!(
                target: "security",
                event = $event,
                $($key = $value),*
            ),
        }
    };
}
