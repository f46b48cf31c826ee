//! Review generator client
//!
//! [`ReviewGenerator`] is the seam between the HTTP layer and the hosted
//! language model. [`OpenAiGenerator`] talks to any OpenAI-compatible
//! `/chat/completions` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::prompt::ReviewPrompt;
use crate::core::GeneratorConfig;

const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 150;
/// Attempts per prompt (initial call + one retry)
const MAX_ATTEMPTS: u32 = 2;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("no API key configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("upstream returned no content")]
    EmptyResponse,
}

impl GenerationError {
    /// Transport failures, timeouts and 5xx are worth a second attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Upstream { status, .. } => *status >= 500,
            Self::NotConfigured | Self::EmptyResponse => false,
        }
    }
}

#[async_trait]
pub trait ReviewGenerator: Send + Sync {
    async fn generate(&self, prompt: &ReviewPrompt) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat completion client
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        })
    }

    async fn request_once(
        &self,
        api_key: &str,
        prompt: &ReviewPrompt,
    ) -> Result<String, GenerationError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = resp.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

#[async_trait]
impl ReviewGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &ReviewPrompt) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::NotConfigured)?;

        let mut attempt = 1;
        loop {
            match self.request_once(api_key, prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < MAX_ATTEMPTS => {
                    tracing::warn!(attempt, error = %e, "Review generation failed, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn prompt() -> ReviewPrompt {
        ReviewPrompt {
            system: "system".into(),
            user: "user".into(),
        }
    }

    fn config(base_url: String) -> GeneratorConfig {
        GeneratorConfig {
            api_key: Some("sk-test".into()),
            base_url,
            model: "gpt-4o-mini".into(),
            timeout_secs: 5,
        }
    }

    /// Serve a fake completion endpoint that fails the first `failures` calls
    /// with `fail_status`.
    async fn fake_upstream(
        failures: usize,
        fail_status: StatusCode,
    ) -> (String, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));

        async fn handler(
            State((calls, failures, fail_status)): State<(Arc<AtomicUsize>, usize, StatusCode)>,
            Json(body): Json<serde_json::Value>,
        ) -> (StatusCode, Json<serde_json::Value>) {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < failures {
                return (fail_status, Json(serde_json::json!({"error": "boom"})));
            }
            assert_eq!(body["model"], "gpt-4o-mini");
            assert_eq!(body["max_tokens"], 150);
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "choices": [{"message": {"role": "assistant", "content": "  Superbe soirée !  "}}]
                })),
            )
        }

        let app = Router::new()
            .route("/v1/chat/completions", post(handler))
            .with_state((calls.clone(), failures, fail_status));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/v1"), calls)
    }

    #[test]
    fn test_retryable_classification() {
        assert!(
            GenerationError::Upstream {
                status: 503,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(
            !GenerationError::Upstream {
                status: 401,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(!GenerationError::EmptyResponse.is_retryable());
        assert!(!GenerationError::NotConfigured.is_retryable());
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let mut cfg = config("http://127.0.0.1:9".into());
        cfg.api_key = None;
        let generator = OpenAiGenerator::new(&cfg).unwrap();
        let err = generator.generate(&prompt()).await.unwrap_err();
        assert!(matches!(err, GenerationError::NotConfigured));
    }

    #[tokio::test]
    async fn test_returns_trimmed_content() {
        let (base_url, calls) = fake_upstream(0, StatusCode::OK).await;
        let generator = OpenAiGenerator::new(&config(base_url)).unwrap();
        let text = generator.generate(&prompt()).await.unwrap();
        assert_eq!(text, "Superbe soirée !");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retries_once_on_server_error() {
        let (base_url, calls) = fake_upstream(1, StatusCode::SERVICE_UNAVAILABLE).await;
        let generator = OpenAiGenerator::new(&config(base_url)).unwrap();
        assert!(generator.generate(&prompt()).await.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_second_server_error() {
        let (base_url, calls) = fake_upstream(5, StatusCode::BAD_GATEWAY).await;
        let generator = OpenAiGenerator::new(&config(base_url)).unwrap();
        let err = generator.generate(&prompt()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Upstream { status: 502, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_retry_on_client_error() {
        let (base_url, calls) = fake_upstream(5, StatusCode::UNAUTHORIZED).await;
        let generator = OpenAiGenerator::new(&config(base_url)).unwrap();
        let err = generator.generate(&prompt()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Upstream { status: 401, .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
