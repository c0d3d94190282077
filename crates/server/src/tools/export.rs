//! reaper_export tool implementation.
//!
//! Writes the whole page cache to a JSON snapshot.

use std::path::{Path, PathBuf};

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{SharedEngine, json_result};

/// Parameters for the reaper_export tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExportParams {
    /// File to write; defaults to the configured export path.
    #[serde(default)]
    pub destination: Option<String>,
}

/// Output from the reaper_export tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportOutput {
    pub destination: String,
    /// Number of sites written.
    pub sites: usize,
    /// Number of pages written.
    pub pages: usize,
}

/// Implementation of the reaper_export tool.
pub async fn export_impl(
    engine: &SharedEngine, default_destination: &Path, params: ExportParams,
) -> Result<CallToolResult, McpError> {
    let destination = params
        .destination
        .filter(|d| !d.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| default_destination.to_path_buf());

    let engine = engine.lock().await;
    engine.export_snapshot(&destination)?;

    let output = ExportOutput {
        destination: destination.display().to_string(),
        sites: engine.cache().sites().len(),
        pages: engine.cache().page_count(),
    };

    json_result(&output)
}
