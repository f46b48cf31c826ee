//! Per-client request budgets for the public write routes
//!
//! Fixed one-minute windows keyed by `(route, client address)`. Counters
//! live in memory and are swept by [`RateLimiter::cleanup`].

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::core::AppState;
use crate::security_log;
use shared::AppError;

const WINDOW: Duration = Duration::from_secs(60);
/// Windows untouched for this long are dropped by [`RateLimiter::cleanup`]
const STALE_AFTER: Duration = Duration::from_secs(300);

type Key = (&'static str, String);

struct Window {
    opened: Instant,
    hits: u32,
}

impl Window {
    /// Count one request at `now`, reopening the window when it has elapsed.
    /// Returns the number of requests seen in the current window.
    fn hit(&mut self, now: Instant, length: Duration) -> u32 {
        if now.duration_since(self.opened) >= length {
            self.opened = now;
            self.hits = 0;
        }
        self.hits = self.hits.saturating_add(1);
        self.hits
    }
}

#[derive(Clone, Default)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<Key, Window>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while `client` has made at most `max_requests` calls to
    /// `route` in the current window
    pub async fn check(
        &self,
        route: &'static str,
        client: &str,
        max_requests: u32,
        window: Duration,
    ) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let hits = windows
            .entry((route, client.to_owned()))
            .or_insert(Window {
                opened: now,
                hits: 0,
            })
            .hit(now, window);
        hits <= max_requests
    }

    pub async fn cleanup(&self) {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.opened) < STALE_AFTER);
        let dropped = before - windows.len();
        if dropped > 0 {
            tracing::debug!(dropped, remaining = windows.len(), "Rate limiter sweep");
        }
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Client address: first `X-Forwarded-For` hop, else the socket peer
pub fn extract_ip(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty());

    match forwarded {
        Some(ip) => ip.to_owned(),
        None => request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_owned()),
    }
}

async fn enforce(
    state: &AppState,
    route: &'static str,
    max_requests: u32,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let ip = extract_ip(&request);
    if state.rate_limiter.check(route, &ip, max_requests, WINDOW).await {
        return Ok(next.run(request).await);
    }
    security_log!("WARN", "rate_limited", route = route, ip = ip);
    Err(AppError::too_many_requests().into_response())
}

/// Budget for `POST /generate-review`
pub async fn generate_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let max = state.config.rate_limits.generate_per_minute;
    enforce(&state, "generate", max, request, next).await
}

/// Budget for `POST /api/login`
pub async fn login_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let max = state.config.rate_limits.login_per_minute;
    enforce(&state, "login", max, request, next).await
}
