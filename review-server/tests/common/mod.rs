//! Shared fixtures for the HTTP tests: in-memory database, stub generator
//! and a oneshot request helper.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use review_server::db::DbService;
use review_server::{AppState, Config, GenerationError, ReviewGenerator, ReviewPrompt, api};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "test-password";
pub const REVIEW_TEXT: &str = "Une soirée parfaite, merci Léa pour le tiramisu !";

/// Records every prompt; fails on demand
#[derive(Default)]
pub struct StubGenerator {
    prompts: Mutex<Vec<ReviewPrompt>>,
    fail: bool,
}

impl StubGenerator {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> Vec<ReviewPrompt> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl ReviewGenerator for StubGenerator {
    async fn generate(&self, prompt: &ReviewPrompt) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        if self.fail {
            return Err(GenerationError::Upstream {
                status: 503,
                body: "upstream exploded".into(),
            });
        }
        Ok(REVIEW_TEXT.to_string())
    }
}

/// How a test request authenticates
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    None,
    Basic(&'a str, &'a str),
    Bearer(&'a str),
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub struct TestApp {
    pub state: AppState,
    pub generator: Arc<StubGenerator>,
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.admin.username = ADMIN_USER.into();
    config.admin.password = ADMIN_PASSWORD.into();
    config.jwt.secret = "integration-test-secret".into();
    config.rate_limits.generate_per_minute = 1_000;
    config.rate_limits.login_per_minute = 1_000;
    config
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with(test_config(), StubGenerator::default()).await
    }

    pub async fn with(config: Config, generator: StubGenerator) -> Self {
        let pool = DbService::in_memory().await.unwrap().pool;
        let generator = Arc::new(generator);
        let state = AppState::new(config, pool, generator.clone());
        Self { state, generator }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        auth: Auth<'_>,
    ) -> TestResponse {
        self.send(method, uri, body.map(|json| json.to_string()), auth)
            .await
    }

    /// Admin request with a body sent verbatim as `application/json`
    pub async fn admin_raw(&self, method: Method, uri: &str, body: &str) -> TestResponse {
        let auth = Auth::Basic(ADMIN_USER, ADMIN_PASSWORD);
        self.send(method, uri, Some(body.to_string()), auth).await
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
        auth: Auth<'_>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        match auth {
            Auth::None => {}
            Auth::Basic(user, pass) => {
                let encoded = STANDARD.encode(format!("{user}:{pass}"));
                builder = builder.header(header::AUTHORIZATION, format!("Basic {encoded}"));
            }
            Auth::Bearer(token) => {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
        }

        let request = match body {
            Some(text) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(text))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = api::build_app(self.state.clone())
            .oneshot(request)
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, Auth::None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.request(Method::POST, uri, Some(body), Auth::None).await
    }

    pub async fn admin(&self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        self.request(method, uri, body, Auth::Basic(ADMIN_USER, ADMIN_PASSWORD))
            .await
    }

    pub async fn generate(&self, body: Value) -> TestResponse {
        self.post("/generate-review", body).await
    }

    /// Create a server through the admin API and return its id
    pub async fn create_server(&self, name: &str) -> i64 {
        let resp = self
            .admin(
                Method::POST,
                "/api/servers",
                Some(serde_json::json!({ "name": name })),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
        resp.body["id"].as_i64().unwrap()
    }

    /// Create a menu option through the admin API and return its id
    pub async fn create_option(&self, text: &str, category: &str) -> i64 {
        let resp = self
            .admin(
                Method::POST,
                "/api/options/flavors",
                Some(serde_json::json!({ "text": text, "category": category })),
            )
            .await;
        assert_eq!(resp.status, StatusCode::CREATED, "{}", resp.body);
        resp.body["id"].as_i64().unwrap()
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.state.pool)
            .await
            .unwrap()
    }
}
