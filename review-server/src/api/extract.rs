//! Request extractors

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::utils::AppError;

/// `Json<T>` whose rejections render as [`AppError`]
///
/// Syntax errors, wrong field types and a missing content type all become
/// 400 `InvalidRequest` with axum's reason as the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;
    use axum::body::Body;
    use http::{StatusCode, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Named {
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let req = json_request(r#"{"name":"Léa"}"#);
        let JsonBody(named) = JsonBody::<Named>::from_request(req, &()).await.unwrap();
        assert_eq!(named.name, "Léa");
    }

    #[tokio::test]
    async fn test_rejections_are_invalid_request() {
        for body in [r#"{not json"#, r#"{"name":5}"#] {
            let err = JsonBody::<Named>::from_request(json_request(body), &())
                .await
                .unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidRequest);
            assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        }

        let untyped = Request::builder().body(Body::from(r#"{"name":"x"}"#)).unwrap();
        let err = JsonBody::<Named>::from_request(untyped, &()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }
}
