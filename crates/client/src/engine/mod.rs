//! The page-serving façade.
//!
//! `ReaperEngine` ties the completion client, the site cache and the link
//! rewriter together:
//!
//! - **Pages**: cache probe, then on a miss prompt, generate, rewrite links,
//!   store and return. A stored page is returned verbatim forever after.
//! - **Search**: always a fresh generation, never stored.
//! - **Export**: full JSON dump of the cache.
//!
//! The cache is only written after a complete success, so a failed request
//! leaves nothing behind and the next request retries from scratch.

pub mod observer;
pub mod prompt;

pub use observer::{PageObserver, RawPageDump};

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use reaper_core::{AppConfig, Error, SiteCache};

use crate::completion::{ChatClient, ChatConfig, CompletionClient, CompletionRequest};
use crate::rewrite::rewrite_links;

/// Model parameters applied to every generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for GenerationSettings {
    fn from(config: &AppConfig) -> Self {
        Self { model: config.model.clone(), temperature: config.temperature, max_tokens: config.max_tokens }
    }
}

/// Generates, rewrites and memoizes pages of the simulated internet.
pub struct ReaperEngine {
    client: Arc<dyn CompletionClient>,
    cache: SiteCache,
    settings: GenerationSettings,
    observer: Option<Arc<dyn PageObserver>>,
}

impl ReaperEngine {
    /// Create an engine with an empty cache around any completion backend.
    pub fn new(client: Arc<dyn CompletionClient>, settings: GenerationSettings) -> Self {
        Self { client, cache: SiteCache::new(), settings, observer: None }
    }

    /// Build an engine talking to the configured chat-completions endpoint.
    ///
    /// Attaches a [`RawPageDump`] when `debug_dump_path` is set. The API key
    /// is not checked here; generation fails until one is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let client = ChatClient::new(ChatConfig::from_app_config(config))?;
        let engine = Self::new(Arc::new(client), GenerationSettings::from(config));

        Ok(match &config.debug_dump_path {
            Some(path) => engine.with_observer(Arc::new(RawPageDump::new(path))),
            None => engine,
        })
    }

    /// Attach an instrumentation hook for raw generated pages.
    pub fn with_observer(mut self, observer: Arc<dyn PageObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn cache(&self) -> &SiteCache {
        &self.cache
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Serve a page of `site` at `path`, generating it on first request.
    ///
    /// `query` is accepted for front-ends that forward a query string; it does
    /// not take part in the prompt or the cache key.
    pub async fn request_page(&mut self, site: &str, path: &str, query: Option<&str>) -> Result<String, Error> {
        if site.trim().is_empty() {
            return Err(Error::InvalidInput("site cannot be empty".into()));
        }

        if let Some(page) = self.cache.lookup(site, path) {
            tracing::debug!(site, path, "cache hit");
            return Ok(page.html.clone());
        }

        tracing::info!(site, path, query, "cache miss, generating page");

        let raw = self.generate(prompt::page_prompt(site, path)).await?;
        if let Some(observer) = &self.observer {
            observer.page_generated(site, path, &raw);
        }

        let html = rewrite_links(&raw);
        Ok(self.cache.store(site, path, html).html.clone())
    }

    /// Fabricate a search results page for `query`. Never cached.
    pub async fn request_search(&self, query: &str) -> Result<String, Error> {
        if query.trim().is_empty() {
            return Err(Error::InvalidInput("query cannot be empty".into()));
        }

        tracing::info!(query, "generating search results");

        let raw = self.generate(prompt::search_prompt(query)).await?;
        Ok(rewrite_links(&raw))
    }

    /// Write the whole cache to `destination` as JSON.
    pub fn export_snapshot(&self, destination: impl AsRef<Path>) -> Result<(), Error> {
        self.cache.export(destination)
    }

    async fn generate(&self, user_prompt: String) -> Result<String, Error> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: prompt::messages(user_prompt),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let start = Instant::now();
        let completion = self.client.complete(&request).await.map_err(|e| {
            tracing::warn!(model = %request.model, "generation failed: {}", e);
            Error::from(e)
        })?;
        tracing::debug!(model = %request.model, "generated {} chars in {:?}", completion.len(), start.elapsed());

        Ok(prompt::assemble_document(&completion))
    }
}
