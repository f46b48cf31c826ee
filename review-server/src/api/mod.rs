//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`review`] - customer review generation (rate limited)
//! - [`public`] - catalog snapshot for the customer UI
//! - [`auth`] - dashboard login (rate limited)
//! - [`servers`] - staff roster CRUD (admin)
//! - [`menu_options`] - menu option CRUD (admin)
//! - [`feedback`] - internal feedback triage (admin)
//! - [`dashboard`] - analytics and data reset (admin)

pub mod auth;
pub mod dashboard;
mod extract;
pub mod feedback;
pub mod health;
pub mod menu_options;
pub mod public;
pub mod review;
pub mod servers;

use axum::Router;
use axum::middleware;
use http::{HeaderName, HeaderValue, Method, header};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_admin;
use crate::core::AppState;

pub use extract::JsonBody;
pub use shared::{AppError, AppResult};

/// Body of every successful delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: i64,
}

impl DeleteResponse {
    pub fn new(id: i64) -> Self {
        Self { deleted: true, id }
    }
}

const REQUEST_ID: &str = "x-request-id";

/// UUID v4 per request, unless the client sent one
#[derive(Clone)]
struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, admin ones behind [`require_admin`]
pub fn build_router(state: &AppState) -> Router<AppState> {
    let admin = Router::new()
        .merge(servers::router())
        .merge(menu_options::router())
        .merge(feedback::router())
        .merge(dashboard::router())
        // route_layer: unknown paths stay 404 instead of 401
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(health::router())
        .merge(public::router())
        .merge(review::router(state))
        .merge(auth::router(state))
        .merge(admin)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Fully configured application: routes, middleware and state
pub fn build_app(state: AppState) -> Router {
    build_router(&state)
        .layer(cors_layer(&state.config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
        // set before tracing, echoed on the response
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID),
            UuidRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID,
        )))
        .with_state(state)
}
