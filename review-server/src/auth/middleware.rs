//! Admin guard
//!
//! Accepts either `Authorization: Basic` with the configured admin
//! credentials or `Authorization: Bearer <jwt>` issued by `/api/login`.
//! On success an [`AdminIdentity`] is inserted into the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{HeaderValue, header};

use super::{JwtError, JwtService, credentials};
use crate::core::AppState;
use crate::security_log;
use shared::AppError;

/// How the caller authenticated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    Basic,
    Bearer,
}

/// Authenticated dashboard user
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub username: String,
    pub method: AuthMethod,
}

/// 401 with a Basic challenge so browsers prompt for credentials
fn challenge(err: AppError) -> Response {
    let mut resp = err.into_response();
    resp.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"dashboard\""),
    );
    resp
}

/// Authentication middleware for admin routes
///
/// | Failure | Code |
/// |---------|------|
/// | no / unsupported Authorization header | NotAuthenticated |
/// | wrong Basic credentials | InvalidCredentials |
/// | expired token | TokenExpired |
/// | invalid token | TokenInvalid |
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // CORS preflight
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned);
    let uri = req.uri().path().to_owned();

    let Some(auth_header) = auth_header else {
        security_log!("WARN", "auth_missing", uri = uri);
        return Err(challenge(AppError::unauthorized()));
    };

    let identity = if let Some(token) = JwtService::extract_from_header(&auth_header) {
        match state.jwt.validate_token(token) {
            Ok(claims) => AdminIdentity {
                username: claims.sub,
                method: AuthMethod::Bearer,
            },
            Err(e) => {
                security_log!("WARN", "auth_failed", error = e.to_string(), uri = uri);
                return Err(challenge(match e {
                    JwtError::ExpiredToken => AppError::token_expired(),
                    _ => AppError::invalid_token("Invalid token"),
                }));
            }
        }
    } else if let Some((username, password)) = credentials::parse_basic(&auth_header) {
        if !credentials::verify(&state.config.admin, &username, &password) {
            security_log!("WARN", "auth_failed", username = username, uri = uri);
            return Err(challenge(AppError::invalid_credentials()));
        }
        AdminIdentity {
            username,
            method: AuthMethod::Basic,
        }
    } else {
        security_log!("WARN", "auth_unsupported_scheme", uri = uri);
        return Err(challenge(AppError::unauthorized()));
    };

    tracing::debug!(username = %identity.username, method = ?identity.method, "Admin authenticated");
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
