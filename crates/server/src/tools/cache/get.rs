//! cache_get tool implementation.
//!
//! Retrieves a generated page without generating it.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use reaper_core::Error;

use crate::tools::{SharedEngine, json_result};

/// Parameters for the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetParams {
    /// Site identifier.
    pub site: String,
    /// Resource path within the site.
    pub path: String,
}

/// Output from the cache_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheGetOutput {
    pub site: String,
    pub path: String,
    pub html: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
}

/// Implementation of the cache_get tool.
pub async fn get_impl(engine: &SharedEngine, params: CacheGetParams) -> Result<CallToolResult, McpError> {
    let engine = engine.lock().await;
    let page = engine
        .cache()
        .lookup(&params.site, &params.path)
        .ok_or_else(|| Error::CacheMiss(format!("{} {}", params.site, params.path)))?;

    let output = CacheGetOutput {
        generated_at: page.generated_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        html: page.html.clone(),
        site: params.site,
        path: params.path,
    };

    json_result(&output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::open::{OpenParams, open_impl};
    use crate::tools::testing::{engine_with, output};

    #[tokio::test]
    async fn test_get_impl_missing() {
        let engine = engine_with(vec![]);
        let params = CacheGetParams { site: "fakesite.net".to_string(), path: "/".to_string() };

        let result = get_impl(&engine, params).await;
        assert_eq!(result.unwrap_err().code.0, -32002);
    }

    #[tokio::test]
    async fn test_get_impl_found() {
        let engine = engine_with(vec!["<p>hello</p></html>"]);
        let open = OpenParams { site: "fakesite.net".into(), path: Some("/".into()), ..Default::default() };
        open_impl(&engine, open).await.unwrap();

        let params = CacheGetParams { site: "fakesite.net".to_string(), path: "/".to_string() };
        let out: CacheGetOutput = output(&get_impl(&engine, params).await.unwrap());
        assert!(out.html.contains("<p>hello</p>"));
        assert!(out.generated_at.ends_with('Z'));
    }
}
