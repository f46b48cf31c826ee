//! Dashboard analytics API (admin)
//!
//! | Path | Method |
//! |------|--------|
//! | /dashboard | GET |
//! | /api/server-stats?period= | GET |
//! | /api/menu-performance?period= | GET |
//! | /api/qualitative-synthesis | GET |
//! | /api/reset-data | POST |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::AppState;

pub use handler::ResetResponse;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handler::summary))
        .route("/api/server-stats", get(handler::server_stats))
        .route("/api/menu-performance", get(handler::menu_performance))
        .route(
            "/api/qualitative-synthesis",
            get(handler::qualitative_synthesis),
        )
        .route("/api/reset-data", post(handler::reset_data))
}
