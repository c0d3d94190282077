//! mcp-reaper server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use reaper_client::ReaperEngine;
use reaper_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    if let Err(e) = config.require_api_key() {
        tracing::warn!(error = %e, "no API key configured; page generation will fail until one is set");
    }
    let engine = ReaperEngine::from_config(&config).context("failed to create engine")?;

    tracing::info!(model = %config.model, base_url = %config.base_url, "Starting mcp-reaper server on stdio transport");

    let handler = handler::ReaperServer::new(Arc::new(Mutex::new(engine)), config.export_path.clone());
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
