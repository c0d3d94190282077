//! Link rewriting for generated pages.
//!
//! Every anchor target in a generated page is pointed back at the simulated
//! root: `http://foo.example/bar` becomes `/foo.example/bar`, `help` and
//! `/help` both become `/help`. `mailto:` links are left alone.
//!
//! ### Tag scanning
//! - Anchor start tags are located with a small scanner that steps over
//!   comments and the bodies of `<script>` and `<style>` elements.
//! - Only the `href` value is replaced; every other byte of the document,
//!   including attribute quoting, is emitted unchanged.
//! - An anchor without a usable `href` is skipped, never an error.

pub mod links;

pub use links::{Link, extract_links};

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// Comments, raw-text elements, and anchor start tags, in that priority.
static MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)(?P<comment><!--.*?-->)|(?P<raw><(script|style)\b.*?</(script|style)\s*>)|(?P<anchor><a\b(?:[^>"']|"[^"]*"|'[^']*')*>)"#,
    )
    .expect("invalid markup pattern")
});

/// One attribute of a start tag: a name and an optional quoted or bare value.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?P<name>[^\s"'>/=]+)(?:\s*=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\s"'>]+)))?"#)
        .expect("invalid attribute pattern")
});

/// Rewrite every anchor target in `html` to a root-relative path.
pub fn rewrite_links(html: &str) -> String {
    MARKUP
        .replace_all(html, |caps: &Captures| match caps.name("anchor") {
            Some(tag) => rewrite_anchor_tag(tag.as_str()).into_owned(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn rewrite_anchor_tag(tag: &str) -> Cow<'_, str> {
    // Attributes follow `<a`; each value is consumed whole.
    let attrs = &tag[2..];
    let Some(value) = ATTRIBUTE
        .captures_iter(attrs)
        .find(|caps| caps["name"].eq_ignore_ascii_case("href"))
        .and_then(|caps| caps.name("dq").or_else(|| caps.name("sq")).or_else(|| caps.name("bare")))
    else {
        return Cow::Borrowed(tag);
    };

    tracing::debug!(href = value.as_str(), "rewriting link");

    let Some(rewritten) = rewrite_href(value.as_str()) else {
        return Cow::Borrowed(tag);
    };

    let (start, end) = (value.start() + 2, value.end() + 2);
    let mut out = String::with_capacity(tag.len() + 1);
    out.push_str(&tag[..start]);
    out.push_str(&rewritten);
    out.push_str(&tag[end..]);
    Cow::Owned(out)
}

/// Map one link target to its root-relative form.
///
/// Returns `None` when the target must be left as it is: `mailto:` links and
/// empty targets.
pub fn rewrite_href(href: &str) -> Option<String> {
    let trimmed = href.trim();
    if trimmed.is_empty() || trimmed.to_ascii_lowercase().contains("mailto:") {
        return None;
    }

    let without_scheme = strip_prefix_ignore_case(trimmed, "https://")
        .or_else(|| strip_prefix_ignore_case(trimmed, "http://"))
        .unwrap_or(trimmed);

    Some(format!("/{}", without_scheme.trim_start_matches('/')))
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) { Some(&s[prefix.len()..]) } else { None }
}
