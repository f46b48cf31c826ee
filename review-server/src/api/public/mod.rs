//! Public catalog API (no auth)

mod handler;

use axum::{Router, routing::get};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/public/data", get(handler::data))
}
