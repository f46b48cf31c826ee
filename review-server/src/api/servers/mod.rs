//! Server roster API (admin)

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/servers", get(handler::list).post(handler::create))
        .route(
            "/api/servers/{id}",
            put(handler::update).delete(handler::delete),
        )
}
