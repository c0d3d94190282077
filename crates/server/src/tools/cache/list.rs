//! cache_list tool implementation.
//!
//! Lists generated sites and the paths stored under each.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::tools::{SharedEngine, json_result};

/// Parameters for the cache_list tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CacheListParams {
    /// Only list this site.
    #[serde(default)]
    pub site: Option<String>,
}

/// A stored page, without its markup.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PageEntry {
    pub path: String,
    pub generated_at: String,
    pub bytes: usize,
}

/// A site and its stored pages.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SiteEntry {
    pub site: String,
    pub pages: Vec<PageEntry>,
}

/// Output from the cache_list tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CacheListOutput {
    pub sites: Vec<SiteEntry>,
    pub total_pages: usize,
}

/// Implementation of the cache_list tool.
pub async fn list_impl(engine: &SharedEngine, params: CacheListParams) -> Result<CallToolResult, McpError> {
    let engine = engine.lock().await;
    let cache = engine.cache();

    let sites: Vec<SiteEntry> = cache
        .sites()
        .into_iter()
        .filter(|site| params.site.as_deref().is_none_or(|wanted| wanted == *site))
        .map(|site| SiteEntry {
            site: site.to_string(),
            pages: cache
                .paths(site)
                .into_iter()
                .filter_map(|path| {
                    cache.lookup(site, path).map(|page| PageEntry {
                        path: path.to_string(),
                        generated_at: page.generated_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                        bytes: page.html.len(),
                    })
                })
                .collect(),
        })
        .collect();

    let total_pages = sites.iter().map(|s| s.pages.len()).sum();

    json_result(&CacheListOutput { sites, total_pages })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::open::{OpenParams, open_impl};
    use crate::tools::testing::{engine_with, output};

    async fn open(engine: &SharedEngine, site: &str, path: &str) {
        let params = OpenParams { site: site.into(), path: Some(path.into()), ..Default::default() };
        open_impl(engine, params).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_empty() {
        let engine = engine_with(vec![]);
        let out: CacheListOutput = output(&list_impl(&engine, CacheListParams::default()).await.unwrap());
        assert!(out.sites.is_empty());
        assert_eq!(out.total_pages, 0);
    }

    #[tokio::test]
    async fn test_list_all_and_filtered() {
        let engine = engine_with(vec!["<p>1</p>", "<p>2</p>", "<p>3</p>"]);
        open(&engine, "foo", "/b").await;
        open(&engine, "foo", "/a").await;
        open(&engine, "bar", "/").await;

        let out: CacheListOutput = output(&list_impl(&engine, CacheListParams::default()).await.unwrap());
        assert_eq!(out.total_pages, 3);
        assert_eq!(out.sites[0].site, "bar");
        assert_eq!(out.sites[1].site, "foo");
        let paths: Vec<&str> = out.sites[1].pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b"]);

        let params = CacheListParams { site: Some("bar".into()) };
        let out: CacheListOutput = output(&list_impl(&engine, params).await.unwrap());
        assert_eq!(out.sites.len(), 1);
        assert_eq!(out.total_pages, 1);
    }
}
