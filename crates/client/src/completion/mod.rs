//! Chat-completions client for page generation.
//!
//! Provides the `CompletionClient` seam the engine generates through, and an
//! implementation for any OpenAI-compatible endpoint (Groq by default).
//!
//! ### Behavior
//!
//! - **Endpoint**: `POST {base_url}/chat/completions`
//! - **Authentication**: bearer token from the configured API key.
//! - **Timeout**: every call is bounded by the configured timeout.
//! - **Retries**: off by default; when enabled, only transient failures
//!   (429, 5xx, timeouts, network errors) are retried with exponential backoff.

pub mod error;
pub mod request;
pub mod response;

pub use error::CompletionError;
pub use request::{ChatMessage, CompletionRequest, Role};
pub use response::{CompletionResponse, TokenUsage};

use async_trait::async_trait;
use reaper_core::AppConfig;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default base URL for the Groq OpenAI-compatible API.
const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "reaper/0.1";

/// First retry delay; doubles per attempt.
const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Upper bound on a single retry delay.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// Text-completion backend the engine generates pages through.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the generated text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

/// Chat client configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Bearer token for the completion service.
    pub api_key: String,
    /// Base URL (default: https://api.groq.com/openai/v1).
    pub base_url: String,
    /// Request timeout (default: 120s).
    pub timeout: Duration,
    /// User-agent string (default: reaper/0.x).
    pub user_agent: String,
    /// Retries after the first attempt for transient failures (default: 0).
    pub max_retries: u32,
    /// Delay before the first retry (default: 500ms).
    pub retry_base_delay: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_retries: 0,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }
}

impl ChatConfig {
    /// Build client settings from the application configuration.
    ///
    /// A missing credential is carried through as an empty key and reported
    /// on the first completion call.
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            max_retries: config.max_retries,
            ..Default::default()
        }
    }

    /// Backoff before retry number `attempt` (1-based).
    fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.retry_base_delay.saturating_mul(factor).min(MAX_RETRY_DELAY)
    }
}

/// OpenAI-compatible chat-completions client.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    config: ChatConfig,
}

impl ChatClient {
    /// Create a new chat client with the given configuration.
    pub fn new(config: ChatConfig) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Single attempt, no retrying.
    async fn send_once(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));

        let http_response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, &self.config.user_agent)
            .json(request)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("completion API response status: {}", status);

        if status == 401 || status == 403 {
            return Err(CompletionError::AuthError);
        }

        if status == 429 {
            return Err(CompletionError::RateLimited);
        }

        if status.is_client_error() || status.is_server_error() {
            return Err(CompletionError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let response: CompletionResponse =
            serde_json::from_slice(&bytes).map_err(|e| CompletionError::Parse(e.to_string()))?;

        if response.truncated() {
            tracing::warn!(max_tokens = request.max_tokens, "completion hit the token limit; output is truncated");
        }
        if let Some(usage) = response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion token usage"
            );
        }

        response.into_text()
    }
}

#[async_trait]
impl CompletionClient for ChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        if self.config.api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let start = Instant::now();
        let mut attempt = 0;

        loop {
            match self.send_once(request).await {
                Ok(text) => {
                    tracing::debug!(
                        model = %request.model,
                        attempts = attempt + 1,
                        "completion finished in {:?} ({} chars)",
                        start.elapsed(),
                        text.len()
                    );
                    return Ok(text);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.retry_delay(attempt);
                    tracing::warn!(attempt, ?delay, error = %e, "completion failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
