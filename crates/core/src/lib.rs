//! Core types and shared functionality for reaper.
//!
//! This crate provides:
//! - The in-memory site cache and its JSON snapshot export
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{Page, SiteCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
