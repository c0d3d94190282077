//! MCP tool implementations.
//!
//! This module contains all tools exposed by the mcp-reaper server. Every tool
//! goes through one engine behind an async mutex, so calls are served one at
//! a time and a page is never generated twice concurrently.

use std::sync::Arc;

use reaper_client::{Link, ReaperEngine};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use reaper_core::Error;

pub mod cache;
pub mod export;
pub mod open;
pub mod search;

/// Engine shared by all tool calls.
pub type SharedEngine = Arc<Mutex<ReaperEngine>>;

/// Outgoing link of a returned page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PageLink {
    /// Link text.
    pub text: String,
    /// Root-relative target, or a `mailto:` address.
    pub href: String,
}

impl From<Link> for PageLink {
    fn from(link: Link) -> Self {
        Self { text: link.text, href: link.href }
    }
}

/// Serialize a tool output as pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use async_trait::async_trait;
    use reaper_client::{CompletionClient, CompletionError, CompletionRequest, GenerationSettings};
    use std::collections::VecDeque;
    use std::sync::Mutex as StdMutex;

    /// Replays canned completions in order.
    pub struct CannedClient {
        pages: StdMutex<VecDeque<String>>,
    }

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
            self.pages
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(CompletionError::RateLimited)
        }
    }

    pub fn engine_with(pages: Vec<&str>) -> SharedEngine {
        let client = CannedClient { pages: StdMutex::new(pages.into_iter().map(String::from).collect()) };
        Arc::new(Mutex::new(ReaperEngine::new(Arc::new(client), GenerationSettings::default())))
    }

    /// Parse the JSON text content of a tool result.
    pub fn output<T: serde::de::DeserializeOwned>(result: &CallToolResult) -> T {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        let text = content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content");
        serde_json::from_str(text).unwrap()
    }
}
