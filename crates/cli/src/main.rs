//! reaper command-line front-end.
//!
//! One-shot page and search generation against the configured completion
//! service. Pages go to stdout, logs to stderr.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use reaper_client::ReaperEngine;
use reaper_core::AppConfig;
use tracing_subscriber::EnvFilter;

/// Browse a hallucinated internet.
#[derive(Debug, Parser)]
#[command(name = "reaper", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate pages of a fictional site (repeated paths are served from the cache).
    Page {
        /// Fictional site identifier, e.g. fakesite.net
        site: String,

        /// Resource paths to open, in order
        #[arg(default_value = "/")]
        paths: Vec<String>,

        /// Write the page cache to this JSON file afterwards
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },

    /// Generate a fictional search results page.
    Search {
        /// Search query
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("failed to load configuration")?;
    let mut engine = ReaperEngine::from_config(&config).context("failed to create engine")?;

    match cli.command {
        Command::Page { site, paths, export } => {
            for path in &paths {
                let html = engine
                    .request_page(&site, path, None)
                    .await
                    .with_context(|| format!("failed to generate {site}{path}"))?;
                println!("{html}");
            }

            if let Some(destination) = export {
                engine
                    .export_snapshot(&destination)
                    .with_context(|| format!("failed to export to {}", destination.display()))?;
            }
        }
        Command::Search { query } => {
            let html = engine.request_search(&query).await.context("failed to generate search results")?;
            println!("{html}");
        }
    }

    Ok(())
}
