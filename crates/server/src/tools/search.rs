//! reaper_search tool implementation.
//!
//! Generates a fresh fictional results page on every call.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{PageLink, SharedEngine, json_result};

/// Input parameters for reaper_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Search query (required).
    pub query: String,
}

/// Output structure for reaper_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchOutput {
    pub query: String,
    /// Results page markup with links rewritten to root-relative paths.
    pub html: String,
    /// Result links in page order.
    pub links: Vec<PageLink>,
}

/// Implementation of the reaper_search tool.
pub async fn search_impl(engine: &SharedEngine, params: SearchParams) -> Result<CallToolResult, McpError> {
    let html = engine.lock().await.request_search(&params.query).await?;

    tracing::debug!("generated results page for query: {}", params.query);

    let links = reaper_client::extract_links(&html).into_iter().map(PageLink::from).collect();

    json_result(&SearchOutput { query: params.query, html, links })
}
