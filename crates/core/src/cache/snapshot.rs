//! Full JSON dumps of the site cache.
//!
//! The snapshot is an object keyed by site, each value an object keyed by
//! resource path, each leaf the stored HTML. There is no import path.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::SiteCache;
use crate::Error;

/// Nested site -> path -> html mapping as written to disk.
pub type SnapshotMap = BTreeMap<String, BTreeMap<String, String>>;

impl SiteCache {
    /// Copy the cache into its snapshot shape, keys in lexical order.
    pub fn to_snapshot(&self) -> SnapshotMap {
        self.iter()
            .map(|(site, pages)| {
                let pages = pages.iter().map(|(path, page)| (path.clone(), page.html.clone())).collect();
                (site.clone(), pages)
            })
            .collect()
    }

    /// Serialize the whole cache to `destination`, replacing any existing file.
    ///
    /// No atomic-write guarantee: a failure midway may leave a partial file.
    pub fn export(&self, destination: impl AsRef<Path>) -> Result<(), Error> {
        let destination = destination.as_ref();
        let file = File::create(destination)
            .map_err(|e| Error::ExportFailed(format!("{}: {}", destination.display(), e)))?;

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.to_snapshot())
            .map_err(|e| Error::ExportFailed(format!("failed to serialize snapshot: {e}")))?;
        writer
            .flush()
            .map_err(|e| Error::ExportFailed(format!("{}: {}", destination.display(), e)))?;

        tracing::info!(
            destination = %destination.display(),
            sites = self.sites().len(),
            pages = self.page_count(),
            "exported cache snapshot"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_reconstructs_nested_mapping() {
        let mut cache = SiteCache::new();
        cache.store("foo", "/a", "<html>A</html>");
        cache.store("foo", "/b", "<html>B</html>");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("internet.json");
        cache.export(&path).unwrap();

        let parsed: SnapshotMap = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();

        let mut expected = SnapshotMap::new();
        expected.insert(
            "foo".to_string(),
            BTreeMap::from([
                ("/a".to_string(), "<html>A</html>".to_string()),
                ("/b".to_string(), "<html>B</html>".to_string()),
            ]),
        );
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_export_empty_cache() {
        let cache = SiteCache::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        cache.export(&path).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed, serde_json::json!({}));
    }

    #[test]
    fn test_export_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("internet.json");
        std::fs::write(&path, "stale contents that are longer than the new snapshot").unwrap();

        let mut cache = SiteCache::new();
        cache.store("foo", "/", "x");
        cache.export(&path).unwrap();

        let parsed: SnapshotMap = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["foo"]["/"], "x");
    }

    #[test]
    fn test_export_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("internet.json");

        let result = SiteCache::new().export(&path);
        assert!(matches!(result, Err(Error::ExportFailed(_))));
    }
}
