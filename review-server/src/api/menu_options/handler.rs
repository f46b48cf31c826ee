//! Menu Option API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{DeleteResponse, JsonBody};
use crate::core::AppState;
use crate::db::repository::{RepoError, menu_option};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{MenuOption, MenuOptionCreate, MenuOptionUpdate};
use shared::util::{category_key, title_case};

fn repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::MenuOptionNotFound, msg),
        other => other.into(),
    }
}

fn normalize_text(raw: &str) -> AppResult<String> {
    let text = title_case(raw);
    if text.is_empty() {
        return Err(AppError::required("text"));
    }
    Ok(text)
}

fn normalize_category(raw: &str) -> AppResult<String> {
    let category = category_key(raw);
    if category.is_empty() {
        return Err(AppError::required("category"));
    }
    Ok(category)
}

/// GET /api/options/flavors - every option, by category then text
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MenuOption>>> {
    let options = menu_option::find_all(&state.pool).await?;
    Ok(Json(options))
}

/// POST /api/options/flavors
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<MenuOptionCreate>,
) -> AppResult<(StatusCode, Json<MenuOption>)> {
    let data = MenuOptionCreate {
        text: normalize_text(&payload.text)?,
        category: normalize_category(&payload.category)?,
    };
    let created = menu_option::create(&state.pool, &data)
        .await
        .map_err(repo_error)?;
    tracing::info!(option_id = created.id, text = %created.text, category = %created.category, "Menu option created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/options/flavors/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<MenuOptionUpdate>,
) -> AppResult<Json<MenuOption>> {
    let data = MenuOptionUpdate {
        text: payload.text.as_deref().map(normalize_text).transpose()?,
        category: payload
            .category
            .as_deref()
            .map(normalize_category)
            .transpose()?,
    };
    let updated = menu_option::update(&state.pool, id, &data)
        .await
        .map_err(repo_error)?;
    tracing::info!(option_id = id, "Menu option updated");
    Ok(Json(updated))
}

/// DELETE /api/options/flavors/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DeleteResponse>> {
    menu_option::delete(&state.pool, id)
        .await
        .map_err(repo_error)?;
    tracing::info!(option_id = id, "Menu option deleted");
    Ok(Json(DeleteResponse::new(id)))
}
