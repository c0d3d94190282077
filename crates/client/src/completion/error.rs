//! Completion API client error types.

use std::sync::Arc;

/// Errors from the chat-completions client.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// No API key configured.
    #[error("missing API key: set REAPER_API_KEY or API_KEY")]
    MissingApiKey,

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the completion service.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),

    /// The response carried no choices or an empty message.
    #[error("completion contained no text")]
    EmptyCompletion,
}

impl CompletionError {
    /// Transient failures worth another attempt after a backoff.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::RateLimited | CompletionError::Timeout | CompletionError::Network(_) => true,
            CompletionError::HttpError { status } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { CompletionError::Timeout } else { CompletionError::Network(Arc::new(err)) }
    }
}

impl From<CompletionError> for reaper_core::Error {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Parse(_) | CompletionError::EmptyCompletion => {
                reaper_core::Error::InvalidCompletion(err.to_string())
            }
            _ => reaper_core::Error::GenerationUnavailable(err.to_string()),
        }
    }
}
