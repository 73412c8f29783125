//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate giving the extractor and link
//! discovery a small, stable vocabulary for walking parsed markup.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

use crate::patterns::collapse_whitespace;

// === Parsing ===

/// Parse markup into a document. Never fails; malformed input is repaired
/// the way browsers repair it.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// The element to walk for content: `<body>`, or the whole document when the
/// markup produced no body.
#[must_use]
pub fn content_root(doc: &Document) -> Selection<'_> {
    let body = doc.select("body");
    if body.length() > 0 {
        body
    } else {
        doc.select("html")
    }
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

// === Text Content ===

/// Get all text content of node and descendants.
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Visible text of an element with whitespace collapsed and trimmed.
#[must_use]
pub fn normalized_text(sel: &Selection) -> String {
    let text = text_content(sel);
    collapse_whitespace(&text)
}

/// Text of the document's `<title>`, if present and non-blank.
#[must_use]
pub fn document_title(doc: &Document) -> Option<String> {
    let title = doc.select("title");
    if title.length() == 0 {
        return None;
    }
    let text = normalized_text(&title.first());
    (!text.is_empty()).then_some(text)
}

// === Tree Navigation ===

/// Direct element children in document order.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.children().iter().collect()
}
