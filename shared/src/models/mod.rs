//! Data models
//!
//! Shared between the server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps are Unix millis.

pub mod analytics;
pub mod feedback;
pub mod menu_option;
pub mod public;
pub mod review;
pub mod server;

// Re-exports
pub use analytics::*;
pub use feedback::*;
pub use menu_option::*;
pub use public::*;
pub use review::*;
pub use server::*;
