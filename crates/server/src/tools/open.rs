//! reaper_open tool implementation.
//!
//! Serves a page of a fictional site, generating it on the first visit.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{PageLink, SharedEngine, json_result};

/// Input parameters for reaper_open tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct OpenParams {
    /// Fictional site identifier, e.g. "fakesite.net".
    pub site: String,

    /// Resource path within the site (default "/").
    #[serde(default)]
    pub path: Option<String>,

    /// Query string forwarded by the caller; does not affect the page.
    #[serde(default)]
    pub query: Option<String>,
}

/// Output structure for reaper_open tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OpenOutput {
    pub site: String,
    pub path: String,
    /// Page markup with links rewritten to root-relative paths.
    pub html: String,
    pub links: Vec<PageLink>,
    /// Whether the page was served without generating.
    pub cache_hit: bool,
}

/// Implementation of the reaper_open tool.
pub async fn open_impl(engine: &SharedEngine, params: OpenParams) -> Result<CallToolResult, McpError> {
    let path = params.path.filter(|p| !p.is_empty()).unwrap_or_else(|| "/".to_string());

    let mut engine = engine.lock().await;
    let cache_hit = engine.cache().lookup(&params.site, &path).is_some();
    let html = engine
        .request_page(&params.site, &path, params.query.as_deref())
        .await?;
    drop(engine);

    let links = reaper_client::extract_links(&html).into_iter().map(PageLink::from).collect();

    json_result(&OpenOutput { site: params.site, path, html, links, cache_hit })
}
