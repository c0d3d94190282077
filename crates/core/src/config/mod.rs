//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (REAPER_*, plus the bare API_KEY credential)
//! 2. TOML config file (if REAPER_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (REAPER_*)
/// 2. The bare `API_KEY` variable, for the credential only
/// 3. TOML config file (if REAPER_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Completion service credential.
    ///
    /// Set via REAPER_API_KEY or API_KEY environment variable.
    /// Required only when a page or search result has to be generated.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Root of the OpenAI-compatible completion API.
    ///
    /// Set via REAPER_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Hosted model identifier.
    ///
    /// Set via REAPER_MODEL environment variable.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature; 0 is effectively greedy decoding.
    ///
    /// Set via REAPER_TEMPERATURE environment variable.
    #[serde(default)]
    pub temperature: f32,

    /// Upper bound on generated tokens per page.
    ///
    /// Set via REAPER_MAX_TOKENS environment variable.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Completion request timeout in milliseconds.
    ///
    /// Set via REAPER_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries for transient completion failures (0 disables retrying).
    ///
    /// Set via REAPER_MAX_RETRIES environment variable.
    #[serde(default)]
    pub max_retries: u32,

    /// Default destination for cache snapshots.
    ///
    /// Set via REAPER_EXPORT_PATH environment variable.
    #[serde(default = "default_export_path")]
    pub export_path: PathBuf,

    /// When set, every raw generated page is also written to this file.
    ///
    /// Set via REAPER_DEBUG_DUMP_PATH environment variable.
    #[serde(default)]
    pub debug_dump_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".into()
}

fn default_model() -> String {
    "llama3-70b-8192".into()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_timeout_ms() -> u64 {
    120_000
}

fn default_export_path() -> PathBuf {
    PathBuf::from("internet.json")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
            max_retries: 0,
            export_path: default_export_path(),
            debug_dump_path: None,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("REAPER_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment
            .merge(Env::raw().only(&["API_KEY"]).map(|key| key.as_str().to_lowercase().into()))
            .merge(
                Env::prefixed("REAPER_")
                    .ignore(&["CONFIG_FILE"])
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            );

        Self::from_figment(&figment)
    }

    /// Extract and validate configuration from an already assembled figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the completion credential is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the API key is not set.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "api_key".into(),
                hint: "Set REAPER_API_KEY or API_KEY environment variable".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.model, "llama3-70b-8192");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.timeout_ms, 120_000);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.export_path, PathBuf::from("internet.json"));
        assert!(config.debug_dump_path.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(120_000));
    }

    #[test]
    fn test_require_api_key_missing() {
        let config = AppConfig::default();
        let result = config.require_api_key();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_api_key_blank() {
        let config = AppConfig { api_key: Some("   ".into()), ..Default::default() };
        assert!(matches!(config.require_api_key(), Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_api_key_present() {
        let config = AppConfig { api_key: Some("test-key".into()), ..Default::default() };
        let result = config.require_api_key();
        assert_eq!(result.unwrap(), "test-key");
    }

    #[test]
    fn test_toml_layer_overrides_defaults() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string(
            r#"
                model = "llama-3.3-70b-versatile"
                max_tokens = 2048
                debug_dump_path = "curpage.html"
            "#,
        ));

        let config = AppConfig::from_figment(&figment).unwrap();
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.debug_dump_path, Some(PathBuf::from("curpage.html")));
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_from_figment_rejects_invalid_values() {
        let figment =
            Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string("max_tokens = 0"));

        let result = AppConfig::from_figment(&figment);
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_tokens"));
    }

    #[test]
    fn test_load_prefixed_api_key_beats_bare() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("API_KEY", "bare-key");
            assert_eq!(AppConfig::load().unwrap().api_key.as_deref(), Some("bare-key"));

            jail.set_env("REAPER_API_KEY", "prefixed-key");
            assert_eq!(AppConfig::load().unwrap().api_key.as_deref(), Some("prefixed-key"));
            Ok(())
        });
    }

    #[test]
    fn test_load_env_overrides_config_file() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "reaper.toml",
                r#"
                    model = "from-file"
                    max_tokens = 2048
                    export_path = "snapshots/web.json"
                "#,
            )?;
            jail.set_env("REAPER_CONFIG_FILE", "reaper.toml");
            jail.set_env("REAPER_MODEL", "from-env");

            let config = AppConfig::load().unwrap();
            assert_eq!(config.model, "from-env");
            assert_eq!(config.max_tokens, 2048);
            assert_eq!(config.export_path, PathBuf::from("snapshots/web.json"));
            assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
            assert!(config.api_key.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config = AppConfig::load().unwrap();
            assert_eq!(config.model, AppConfig::default().model);
            assert_eq!(config.max_tokens, 4096);
            assert!(config.api_key.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_env_value() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.set_env("REAPER_TEMPERATURE", "3.5");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "temperature"));
            Ok(())
        });
    }
}
