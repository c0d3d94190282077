//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::path::PathBuf;

use crate::tools::SharedEngine;
use crate::tools::cache::{CacheGetParams, CacheListParams, get_impl, list_impl};
use crate::tools::export::{ExportParams, export_impl};
use crate::tools::open::{OpenParams, open_impl};
use crate::tools::search::{SearchParams, search_impl};

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for mcp-reaper.
#[derive(Clone)]
pub struct ReaperServer {
    tool_router: ToolRouter<Self>,
    engine: SharedEngine,
    export_path: PathBuf,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl ReaperServer {
    /// Create a new server handler around a shared engine.
    pub fn new(engine: SharedEngine, export_path: PathBuf) -> Self {
        Self { tool_router: Self::tool_router(), engine, export_path }
    }

    /// Open a page of the simulated internet.
    ///
    /// Generated on first visit, served from the cache afterwards.
    #[tool(description = "Open a page of a fictional website. Returns the HTML and its links; \
                          repeated visits return the same page.")]
    async fn reaper_open(&self, params: Parameters<OpenParams>) -> Result<CallToolResult, McpError> {
        open_impl(&self.engine, params.0).await
    }

    /// Fabricate a search results page. Every call generates a new page.
    #[tool(description = "Search the fictional internet. Returns a freshly generated results page linking to \
                          fictional sites; results are not cached.")]
    async fn reaper_search(&self, params: Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.engine, params.0).await
    }

    /// Dump every generated page to a JSON file.
    #[tool(description = "Export every generated page to a JSON snapshot keyed by site then path.")]
    async fn reaper_export(&self, params: Parameters<ExportParams>) -> Result<CallToolResult, McpError> {
        export_impl(&self.engine, &self.export_path, params.0).await
    }

    /// Read a page from the cache without generating.
    #[tool(description = "Get an already generated page from the cache without generating it.")]
    async fn cache_get(&self, params: Parameters<CacheGetParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.engine, params.0).await
    }

    /// List generated sites and paths.
    #[tool(description = "List generated sites and their page paths.")]
    async fn cache_list(&self, params: Parameters<CacheListParams>) -> Result<CallToolResult, McpError> {
        list_impl(&self.engine, params.0).await
    }
}

impl ServerHandler for ReaperServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-reaper".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
