//! HTTP server lifecycle

use std::net::SocketAddr;
use std::time::Duration;

use crate::api;
use crate::core::{AppState, Config};
use shared::AppError;

/// Interval of the rate limiter sweep
const RATE_LIMIT_CLEANUP: Duration = Duration::from_secs(300);

pub struct Server {
    state: AppState,
}

impl Server {
    /// Open the database and build the generator client
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let state = AppState::initialize(config).await?;
        Ok(Self { state })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> Result<(), AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));

        // Periodic rate limiter cleanup
        let rate_limiter = self.state.rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP);
            loop {
                interval.tick().await;
                rate_limiter.cleanup().await;
            }
        });

        let app = api::build_app(self.state);
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
        tracing::info!("review-server listening on http://{addr}");

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")))?;

        tracing::info!("review-server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
