//! Menu option ("flavor") API (admin)

mod handler;

use axum::{Router, routing::get, routing::put};

use crate::core::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/options/flavors",
            get(handler::list).post(handler::create),
        )
        .route(
            "/api/options/flavors/{id}",
            put(handler::update).delete(handler::delete),
        )
}
