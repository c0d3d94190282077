//! In-memory memoization store for generated pages.
//!
//! A two-level mapping (site identifier -> resource path -> page) owned by a
//! single engine instance. Entries are never evicted and never refreshed; the
//! only way out is a full JSON snapshot export.

pub mod snapshot;

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::Error;

/// A generated page, stored after link rewriting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub html: String,
    pub generated_at: DateTime<Utc>,
}

impl Page {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into(), generated_at: Utc::now() }
    }
}

/// Site-keyed page cache.
#[derive(Debug, Clone, Default)]
pub struct SiteCache {
    sites: HashMap<String, HashMap<String, Page>>,
}

impl SiteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a page. A miss is `None`, never an error.
    pub fn lookup(&self, site: &str, path: &str) -> Option<&Page> {
        self.sites.get(site).and_then(|pages| pages.get(path))
    }

    /// Insert or overwrite a page, creating the site entry on first use.
    pub fn store(&mut self, site: &str, path: &str, html: impl Into<String>) -> &Page {
        let pages = self.sites.entry(site.to_string()).or_default();
        pages.insert(path.to_string(), Page::new(html));
        tracing::debug!(site, path, pages = pages.len(), "stored page");
        &pages[path]
    }

    /// Site identifiers in lexical order.
    pub fn sites(&self) -> Vec<&str> {
        let mut sites: Vec<&str> = self.sites.keys().map(String::as_str).collect();
        sites.sort_unstable();
        sites
    }

    /// Paths stored under `site` in lexical order, empty for an unknown site.
    pub fn paths(&self, site: &str) -> Vec<&str> {
        let mut paths: Vec<&str> = self
            .sites
            .get(site)
            .map(|pages| pages.keys().map(String::as_str).collect())
            .unwrap_or_default();
        paths.sort_unstable();
        paths
    }

    /// Total number of pages across all sites.
    pub fn page_count(&self) -> usize {
        self.sites.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.page_count() == 0
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &HashMap<String, Page>)> {
        self.sites.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_miss_on_empty_cache() {
        let cache = SiteCache::new();
        assert!(cache.lookup("fakesite.net", "/").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_store_then_lookup() {
        let mut cache = SiteCache::new();
        cache.store("fakesite.net", "/", "<html>home</html>");

        let page = cache.lookup("fakesite.net", "/").unwrap();
        assert_eq!(page.html, "<html>home</html>");
        assert!(cache.lookup("fakesite.net", "/about").is_none());
        assert!(cache.lookup("othersite.org", "/").is_none());
    }

    #[test]
    fn test_store_overwrites() {
        let mut cache = SiteCache::new();
        cache.store("foo", "/a", "<html>old</html>");
        cache.store("foo", "/a", "<html>new</html>");

        assert_eq!(cache.lookup("foo", "/a").unwrap().html, "<html>new</html>");
        assert_eq!(cache.page_count(), 1);
    }

    #[test]
    fn test_paths_are_scoped_per_site() {
        let mut cache = SiteCache::new();
        cache.store("foo", "/b", "B");
        cache.store("foo", "/a", "A");
        cache.store("bar", "/", "root");

        assert_eq!(cache.sites(), vec!["bar", "foo"]);
        assert_eq!(cache.paths("foo"), vec!["/a", "/b"]);
        assert_eq!(cache.paths("bar"), vec!["/"]);
        assert!(cache.paths("baz").is_empty());
        assert_eq!(cache.page_count(), 3);
    }

    #[test]
    fn test_same_path_different_sites_are_distinct() {
        let mut cache = SiteCache::new();
        cache.store("foo", "/", "foo root");
        cache.store("bar", "/", "bar root");

        assert_eq!(cache.lookup("foo", "/").unwrap().html, "foo root");
        assert_eq!(cache.lookup("bar", "/").unwrap().html, "bar root");
    }
}
