//! Dashboard API Handlers

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::AdminIdentity;
use crate::core::AppState;
use crate::db::repository::{analytics, feedback, review_log};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{
    DashboardSummary, DishStat, FeedbackStatus, Period, PeriodQuery, QualitativeSynthesis,
    ResetSummary, ServerStat,
};
use shared::util::now_millis;

/// Reviews listed on the dashboard
const RECENT_REVIEWS: i64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub deleted: ResetSummary,
}

fn parse_period(query: &PeriodQuery) -> AppResult<Period> {
    let raw = query.period.as_deref().unwrap_or_default();
    raw.parse()
        .map_err(|_| AppError::new(ErrorCode::InvalidPeriod).with_detail("period", raw))
}

/// GET /dashboard - headline numbers, all-time server ranking and trend
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<DashboardSummary>> {
    let now = now_millis();
    let today = DateTime::from_timestamp_millis(now)
        .unwrap_or_else(Utc::now)
        .date_naive();

    let total_reviews = review_log::count_since(&state.pool, None).await?;
    let reviews_last_7_days =
        review_log::count_since(&state.pool, Period::Last7Days.since(now)).await?;
    let new_feedback_count = feedback::count_by_status(&state.pool, FeedbackStatus::New).await?;
    let server_stats = analytics::server_stats(&state.pool, None).await?;
    let trend = analytics::review_trend(&state.pool, today).await?;
    let recent_reviews = review_log::find_recent(&state.pool, RECENT_REVIEWS).await?;

    Ok(Json(DashboardSummary {
        total_reviews,
        reviews_last_7_days,
        new_feedback_count,
        server_stats,
        trend,
        recent_reviews,
    }))
}

/// GET /api/server-stats?period=7|30|all
pub async fn server_stats(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<ServerStat>>> {
    let period = parse_period(&query)?;
    let stats = analytics::server_stats(&state.pool, period.since(now_millis())).await?;
    Ok(Json(stats))
}

/// GET /api/menu-performance?period=7|30|all
pub async fn menu_performance(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> AppResult<Json<Vec<DishStat>>> {
    let period = parse_period(&query)?;
    let stats = analytics::menu_performance(&state.pool, period.since(now_millis())).await?;
    Ok(Json(stats))
}

/// GET /api/qualitative-synthesis
pub async fn qualitative_synthesis(
    State(state): State<AppState>,
) -> AppResult<Json<QualitativeSynthesis>> {
    let synthesis = analytics::qualitative_synthesis(&state.pool).await?;
    Ok(Json(synthesis))
}

/// POST /api/reset-data - empty every log table
pub async fn reset_data(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminIdentity>,
) -> AppResult<Json<ResetResponse>> {
    let deleted = review_log::reset_all(&state.pool).await?;
    tracing::warn!(
        username = %admin.username,
        generated_reviews = deleted.generated_reviews,
        menu_selections = deleted.menu_selections,
        qualitative_feedback = deleted.qualitative_feedback,
        internal_feedback = deleted.internal_feedback,
        "Analytics data reset"
    );
    Ok(Json(ResetResponse {
        message: "All review and feedback data has been deleted".to_string(),
        deleted,
    }))
}
