//! Internal feedback triage API (admin)

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/internal-feedback", get(handler::list))
        .route(
            "/api/internal-feedback/{id}/status",
            put(handler::update_status),
        )
}
