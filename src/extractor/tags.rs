//! Tag catalogs for section extraction.
//!
//! Arrays for iteration and `HashSet`s for O(1) lookup, in the same shape
//! for every catalog.

use std::collections::HashSet;
use std::sync::LazyLock;

// === Tag Lists (arrays for iteration) ===

/// Heading tags that open a new section: h1, h2, h3
pub static HEADING_TAGS: [&str; 3] = ["h1", "h2", "h3"];

/// Prose tags appended to the current section body: p
pub static PARAGRAPH_TAGS: [&str; 1] = ["p"];

/// List tags appended to the current section body, one line per item: ul, ol
pub static LIST_TAGS: [&str; 2] = ["ul", "ol"];

/// List item tag
pub const LIST_ITEM_TAG: &str = "li";

/// Subtrees never walked: their text is not visible prose.
pub static SKIPPED_TAGS: [&str; 4] = ["script", "style", "template", "noscript"];

// === Tag Sets (HashSets for O(1) lookup) ===

/// `HEADING_TAGS` as a `HashSet`
pub static HEADING_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HEADING_TAGS.into_iter().collect());

/// `LIST_TAGS` as a `HashSet`
pub static LIST_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| LIST_TAGS.into_iter().collect());

/// `SKIPPED_TAGS` as a `HashSet`
pub static SKIPPED_TAG_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SKIPPED_TAGS.into_iter().collect());

/// Every content-bearing tag the extractor consumes.
pub static CONTENT_TAG_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HEADING_TAGS
        .into_iter()
        .chain(PARAGRAPH_TAGS)
        .chain(LIST_TAGS)
        .collect()
});

/// Role of a content element in section building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    Heading,
    Paragraph,
    List,
}

/// Classify a lowercase tag name, `None` for tags outside the allow-list.
#[must_use]
pub fn role_of(tag: &str) -> Option<ElementRole> {
    if !CONTENT_TAG_SET.contains(tag) {
        None
    } else if HEADING_TAG_SET.contains(tag) {
        Some(ElementRole::Heading)
    } else if LIST_TAG_SET.contains(tag) {
        Some(ElementRole::List)
    } else if PARAGRAPH_TAGS.contains(&tag) {
        Some(ElementRole::Paragraph)
    } else {
        None
    }
}

#[inline]
#[must_use]
pub fn is_skipped(tag: &str) -> bool {
    SKIPPED_TAG_SET.contains(tag)
}
