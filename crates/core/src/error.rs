//! Unified error types for reaper.
//!
//! Every failure surfaces synchronously to the caller of the engine method
//! that triggered it; nothing in here is retried.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the reaper engine and its front-ends.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty site identifier).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Completion service unreachable, timed out, rate limited or rejected the request.
    #[error("GENERATION_UNAVAILABLE: {0}")]
    GenerationUnavailable(String),

    /// Completion service answered but the body held no usable text.
    #[error("INVALID_COMPLETION: {0}")]
    InvalidCompletion(String),

    /// No cached page for the given site and path.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),

    /// Snapshot export failed.
    #[error("EXPORT_FAILED: {0}")]
    ExportFailed(String),
}

impl Error {
    /// Whether a caller may reasonably retry the same request later.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::GenerationUnavailable(_))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::GenerationUnavailable(msg) => (-32000, msg.clone()),
            Error::InvalidCompletion(msg) => (-32001, msg.clone()),
            Error::CacheMiss(msg) => (-32002, msg.clone()),
            Error::ExportFailed(msg) => (-32003, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CacheMiss("fakesite.net /about".to_string());
        assert!(err.to_string().contains("CACHE_MISS"));
        assert!(err.to_string().contains("/about"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::GenerationUnavailable("rate limited".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32000);

        let err = Error::InvalidInput("site cannot be empty".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
    }

    #[test]
    fn test_only_generation_unavailable_is_transient() {
        assert!(Error::GenerationUnavailable("timeout".into()).is_transient());
        assert!(!Error::InvalidCompletion("no choices".into()).is_transient());
        assert!(!Error::ExportFailed("read-only".into()).is_transient());
    }
}
