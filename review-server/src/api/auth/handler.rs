//! Login handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::api::JsonBody;
use crate::auth::credentials;
use crate::core::AppState;
use crate::security_log;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// POST /api/login - exchange admin credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {

    if req.username.trim().is_empty() {
        return Err(AppError::required("username"));
    }
    if req.password.is_empty() {
        return Err(AppError::required("password"));
    }

    if !credentials::verify(&state.config.admin, req.username.trim(), &req.password) {
        security_log!("WARN", "login_failed", username = req.username.clone());
        return Err(AppError::invalid_credentials());
    }

    let access_token = state
        .jwt
        .generate_token(req.username.trim())
        .map_err(|e| AppError::internal(format!("Failed to issue token: {e}")))?;

    security_log!("INFO", "login_success", username = req.username.clone());

    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.jwt.expires_in(),
    }))
}
