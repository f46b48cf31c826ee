//! Internal Feedback API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::JsonBody;
use crate::core::AppState;
use crate::db::repository::{RepoError, feedback};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{FeedbackQuery, FeedbackStatus, FeedbackStatusUpdate, InternalFeedback};
use shared::util::non_blank;

fn parse_status(raw: &str) -> AppResult<FeedbackStatus> {
    raw.parse()
        .map_err(|_| AppError::new(ErrorCode::InvalidFeedbackStatus).with_detail("status", raw))
}

/// GET /api/internal-feedback?status=&search= - newest first
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FeedbackQuery>,
) -> AppResult<Json<Vec<InternalFeedback>>> {
    let status = non_blank(query.status.as_deref())
        .map(|s| parse_status(&s))
        .transpose()?;
    let search = non_blank(query.search.as_deref());

    let rows = feedback::list(&state.pool, status, search.as_deref()).await?;
    Ok(Json(rows))
}

/// PUT /api/internal-feedback/{id}/status - move an entry forward
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<FeedbackStatusUpdate>,
) -> AppResult<Json<InternalFeedback>> {
    let next = parse_status(&payload.status)?;

    let updated = feedback::update_status(&state.pool, id, next)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::FeedbackNotFound, msg),
            RepoError::Validation(msg) => {
                AppError::with_message(ErrorCode::InvalidStatusTransition, msg)
            }
            other => other.into(),
        })?;

    tracing::info!(feedback_id = id, status = %updated.status, "Feedback status updated");
    Ok(Json(updated))
}
