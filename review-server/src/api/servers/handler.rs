//! Server API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::{DeleteResponse, JsonBody};
use crate::core::AppState;
use crate::db::repository::{RepoError, server};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Server, ServerCreate, ServerUpdate};
use shared::util::{non_blank, title_case};

fn repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::ServerNotFound, msg),
        RepoError::Duplicate(_) => AppError::new(ErrorCode::ServerNameExists),
        other => other.into(),
    }
}

fn normalize_create(payload: ServerCreate) -> AppResult<ServerCreate> {
    let name = title_case(&payload.name);
    if name.is_empty() {
        return Err(AppError::required("name"));
    }
    Ok(ServerCreate {
        name,
        image_url: non_blank(payload.image_url.as_deref()),
    })
}

fn normalize_update(payload: ServerUpdate) -> AppResult<ServerUpdate> {
    let name = match payload.name {
        Some(raw) => {
            let name = title_case(&raw);
            if name.is_empty() {
                return Err(AppError::validation("name must not be empty").with_detail("field", "name"));
            }
            Some(name)
        }
        None => None,
    };
    Ok(ServerUpdate {
        name,
        // blank clears the image
        image_url: payload.image_url.map(|url| url.trim().to_string()),
    })
}

/// GET /api/servers - full roster
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Server>>> {
    let servers = server::find_all(&state.pool).await?;
    Ok(Json(servers))
}

/// POST /api/servers - add a server
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ServerCreate>,
) -> AppResult<(StatusCode, Json<Server>)> {
    let data = normalize_create(payload)?;
    let created = server::create(&state.pool, &data)
        .await
        .map_err(repo_error)?;
    tracing::info!(server_id = created.id, name = %created.name, "Server created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/servers/{id} - rename or change picture
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonBody(payload): JsonBody<ServerUpdate>,
) -> AppResult<Json<Server>> {
    let data = normalize_update(payload)?;
    let updated = server::update(&state.pool, id, &data)
        .await
        .map_err(repo_error)?;
    tracing::info!(server_id = id, name = %updated.name, "Server updated");
    Ok(Json(updated))
}

/// DELETE /api/servers/{id} - remove a server and its review log rows
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DeleteResponse>> {
    let deletion = server::delete(&state.pool, id).await.map_err(repo_error)?;
    tracing::info!(
        server_id = id,
        name = %deletion.server.name,
        reviews_removed = deletion.reviews_removed,
        feedback_detached = deletion.feedback_detached,
        "Server deleted"
    );
    Ok(Json(DeleteResponse::new(id)))
}
