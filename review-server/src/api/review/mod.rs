//! Review generation API (public, rate limited)

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::rate_limit::generate_rate_limit;
use crate::core::AppState;

pub use handler::{DEFAULT_LANG, FEEDBACK_RECEIVED, UNCATEGORIZED};

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/generate-review", post(handler::generate))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            generate_rate_limit,
        ))
}
