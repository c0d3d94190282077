//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `base_url` is not an http(s) URL
    /// - `model` is empty
    /// - `temperature` is outside 0.0..=2.0
    /// - `max_tokens` is 0 or exceeds 32768
    /// - `timeout_ms` is less than 1s or exceeds 10 minutes
    /// - `max_retries` exceeds 10
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigError::Invalid {
                    field: "base_url".into(),
                    reason: format!("unsupported scheme: {}", parsed.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Invalid { field: "base_url".into(), reason: e.to_string() });
            }
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "model".into(), reason: "must not be empty".into() });
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid {
                field: "temperature".into(),
                reason: "must be between 0.0 and 2.0".into(),
            });
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::Invalid { field: "max_tokens".into(), reason: "must be greater than 0".into() });
        }
        if self.max_tokens > 32_768 {
            return Err(ConfigError::Invalid { field: "max_tokens".into(), reason: "must not exceed 32768".into() });
        }

        if self.timeout_ms < 1_000 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 1000ms".into() });
        }
        if self.timeout_ms > 600_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 10 minutes (600000ms)".into(),
            });
        }

        if self.max_retries > 10 {
            return Err(ConfigError::Invalid { field: "max_retries".into(), reason: "must not exceed 10".into() });
        }

        if self.temperature > 0.0 {
            tracing::warn!(
                temperature = self.temperature,
                "non-zero temperature; cold generations of the same page will drift"
            );
        }

        Ok(())
    }
}
