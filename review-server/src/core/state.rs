//! Shared application state

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::{JwtService, RateLimiter};
use crate::core::Config;
use crate::db::DbService;
use crate::review::{OpenAiGenerator, ReviewGenerator};
use shared::AppError;

/// State handed to every handler through axum's `State` extractor
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    pub config: Arc<Config>,
    /// Language-model client
    pub generator: Arc<dyn ReviewGenerator>,
    pub jwt: JwtService,
    /// Counters for the rate-limited routes
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool, generator: Arc<dyn ReviewGenerator>) -> Self {
        Self {
            pool,
            jwt: JwtService::new(&config.jwt),
            config: Arc::new(config),
            generator,
            rate_limiter: RateLimiter::new(),
        }
    }

    /// Open the database and build the production generator
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url).await?;

        if config.generator.api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set: review generation will fail");
        }
        let generator = OpenAiGenerator::new(&config.generator).map_err(|e| {
            AppError::with_message(
                shared::ErrorCode::ConfigError,
                format!("Failed to build generator client: {e}"),
            )
        })?;

        Ok(Self::new(config, db.pool, Arc::new(generator)))
    }
}
