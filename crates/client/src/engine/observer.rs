//! Instrumentation hooks on the generation path.

use std::path::{Path, PathBuf};

/// Notified with every raw page the model produces, before link rewriting.
pub trait PageObserver: Send + Sync {
    fn page_generated(&self, site: &str, path: &str, raw_html: &str);
}

/// Writes the most recently generated raw page to a fixed file.
#[derive(Debug, Clone)]
pub struct RawPageDump {
    path: PathBuf,
}

impl RawPageDump {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageObserver for RawPageDump {
    fn page_generated(&self, site: &str, path: &str, raw_html: &str) {
        if let Err(e) = std::fs::write(&self.path, raw_html) {
            tracing::warn!(site, path, dump = %self.path.display(), "failed to write raw page dump: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_overwrites_with_latest_page() {
        let dir = tempfile::tempdir().unwrap();
        let dump = RawPageDump::new(dir.path().join("curpage.html"));

        dump.page_generated("foo", "/a", "<html>A</html>");
        dump.page_generated("foo", "/b", "<html>B</html>");

        assert_eq!(std::fs::read_to_string(dump.path()).unwrap(), "<html>B</html>");
    }

    #[test]
    fn test_dump_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let dump = RawPageDump::new(dir.path().join("no-such-dir").join("curpage.html"));
        dump.page_generated("foo", "/", "<html></html>");
        assert!(!dump.path().exists());
    }
}
