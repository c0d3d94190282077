//! Client code for reaper.
//!
//! This crate provides the completion client, link rewriting, and the
//! engine façade shared by the server and CLI.

pub mod completion;
pub mod engine;
pub mod rewrite;

pub use completion::{ChatClient, ChatConfig, ChatMessage, CompletionClient, CompletionError, CompletionRequest, Role};
pub use engine::{GenerationSettings, PageObserver, RawPageDump, ReaperEngine};
pub use rewrite::{Link, extract_links, rewrite_href, rewrite_links};
