//! Article link discovery.
//!
//! Collects `<a href>` targets from an index page that fall under the
//! configured path prefixes, resolved against the page URL and deduplicated.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::dom;
use crate::url_utils::{normalize_url, resolve_href, same_host};

/// Which hrefs count as article links.
///
/// A link qualifies when its path starts with at least one include prefix and
/// with no exclude prefix. Relative hrefs are tested as written (so `"#"`
/// excludes in-page anchors); absolute hrefs are tested by path, and only
/// when they point at the base host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRule {
    pub include_prefixes: Vec<String>,
    pub exclude_prefixes: Vec<String>,
}

impl Default for LinkRule {
    fn default() -> Self {
        Self {
            include_prefixes: vec!["/help/".to_string()],
            exclude_prefixes: vec!["/help/guides".to_string(), "#".to_string()],
        }
    }
}

impl LinkRule {
    /// Test the href as written (relative) or its path (absolute).
    #[must_use]
    pub fn accepts(&self, candidate: &str) -> bool {
        let included = self.include_prefixes.is_empty()
            || self.include_prefixes.iter().any(|p| candidate.starts_with(p.as_str()));
        let excluded = self
            .exclude_prefixes
            .iter()
            .any(|p| candidate.starts_with(p.as_str()));
        included && !excluded
    }
}

/// Discover article links in `html`.
///
/// Returns absolute URLs without fragments, deduplicated and sorted.
#[must_use]
pub fn discover_links(html: &str, base: &Url, rule: &LinkRule) -> BTreeSet<String> {
    let doc = dom::parse(html);
    let mut links = BTreeSet::new();

    for anchor in doc.select("a[href]").iter() {
        let Some(href) = dom::get_attribute(&anchor, "href") else {
            continue;
        };
        let href = href.trim();

        let candidate = match Url::parse(href) {
            Ok(absolute) => {
                if !same_host(&absolute, base) {
                    continue;
                }
                absolute.path().to_string()
            }
            Err(_) => href.to_string(),
        };

        if !rule.accepts(&candidate) {
            continue;
        }

        if let Some(resolved) = resolve_href(href, base) {
            links.insert(normalize_url(&resolved));
        }
    }

    debug!(base = %base, count = links.len(), "discovered article links");
    links
}
