//! Dashboard login API (rate limited)

mod handler;

use axum::{Router, middleware, routing::post};

use crate::auth::rate_limit::login_rate_limit;
use crate::core::AppState;

pub use handler::{LoginRequest, LoginResponse};

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/login", post(handler::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ))
}
