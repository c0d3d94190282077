//! Link harvesting from generated pages.

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").expect("invalid selector"));

/// A harvested link with text and href.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Link {
    /// Link text content
    pub text: String,
    /// Target exactly as written in the page
    pub href: String,
}

/// Extract links from an HTML document.
///
/// Collects all `<a>` tags with a non-empty href, in document order, and
/// removes duplicates (by href). Targets are not resolved: after rewriting
/// they are already root-relative paths of the simulated internet.
pub fn extract_links(html: &str) -> Vec<Link> {
    let document = Html::parse_document(html);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&ANCHOR) {
        let href = match element.value().attr("href") {
            Some(h) if !h.trim().is_empty() => h.trim().to_string(),
            _ => continue,
        };

        if !seen.insert(href.clone()) {
            continue;
        }

        let text = element.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        let text = if text.is_empty() { "[link]".to_string() } else { text };

        links.push(Link { text, href });
    }

    links
}
