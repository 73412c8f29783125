//! Section extraction.
//!
//! Walks the content root depth-first in document order and feeds allow-listed
//! elements into a [`SectionState`]. An allow-listed element is consumed whole,
//! so a `<p>` nested in an `<li>` is never counted twice.

use dom_query::Selection;
use tracing::trace;

use super::state::SectionState;
use super::tags::{self, ElementRole, LIST_ITEM_TAG};
use crate::boilerplate::BoilerplateFilter;
use crate::dom;
use crate::result::{Section, LINE_SEPARATOR};

/// Sections of one document plus its `<title>`, used for naming output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocument {
    /// Text of the `<title>` element, if any.
    pub title: Option<String>,

    /// Extracted sections in source order.
    pub sections: Vec<Section>,
}

impl ExtractedDocument {
    /// True when no content element survived; callers must skip persistence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Extract ordered sections from markup.
#[must_use]
pub fn extract_sections(html: &str, filter: &BoilerplateFilter) -> Vec<Section> {
    extract_document(html, filter).sections
}

/// Extract ordered sections and the document title from markup.
#[must_use]
pub fn extract_document(html: &str, filter: &BoilerplateFilter) -> ExtractedDocument {
    let doc = dom::parse(html);
    let root = dom::content_root(&doc);

    let mut state = SectionState::new();
    let mut discarded = 0usize;

    // Reversed children on a stack give a pre-order walk without recursion.
    let mut stack: Vec<Selection> = dom::element_children(&root);
    stack.reverse();

    while let Some(element) = stack.pop() {
        let Some(tag) = dom::tag_name(&element) else {
            continue;
        };

        if tags::is_skipped(&tag) {
            continue;
        }

        let Some(role) = tags::role_of(&tag) else {
            let mut children = dom::element_children(&element);
            children.reverse();
            stack.extend(children);
            continue;
        };

        let text = element_text(&element, role);
        if text.is_empty() {
            continue;
        }
        if filter.is_boilerplate(&text) {
            trace!(tag = %tag, text = %text, "discarded boilerplate element");
            discarded += 1;
            continue;
        }

        match role {
            ElementRole::Heading => state.open_heading(text),
            ElementRole::Paragraph | ElementRole::List => state.push_line(&text),
        }
    }

    let sections = state.finish();
    trace!(sections = sections.len(), discarded, "section extraction complete");

    ExtractedDocument {
        title: dom::document_title(&doc),
        sections,
    }
}

/// Visible text of a content element.
///
/// Headings and paragraphs collapse to one line. Lists render one line per
/// non-empty `<li>`; a list without items falls back to its collapsed text.
fn element_text(element: &Selection, role: ElementRole) -> String {
    match role {
        ElementRole::Heading | ElementRole::Paragraph => dom::normalized_text(element),
        ElementRole::List => {
            let items: Vec<String> = dom::element_children(element)
                .iter()
                .filter(|child| dom::tag_name(child).as_deref() == Some(LIST_ITEM_TAG))
                .map(dom::normalized_text)
                .filter(|item| !item.is_empty())
                .collect();

            if items.is_empty() {
                dom::normalized_text(element)
            } else {
                items.join(LINE_SEPARATOR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_filter() -> BoilerplateFilter {
        BoilerplateFilter::none()
    }

    #[test]
    fn test_headings_group_paragraphs() {
        let html = "<body><h2>A</h2><p>one</p><p>two</p><h2>B</h2><p>three</p></body>";
        let sections = extract_sections(html, &no_filter());
        assert_eq!(
            sections,
            vec![
                Section::new(Some("A".into()), "one\ntwo"),
                Section::new(Some("B".into()), "three"),
            ]
        );
    }

    #[test]
    fn test_nested_containers_are_walked_in_order() {
        let html = r#"
            <body>
              <div><section><h1>Title</h1></section></div>
              <main><div><p>first</p></div><p>second</p></main>
            </body>
        "#;
        let sections = extract_sections(html, &no_filter());
        assert_eq!(sections, vec![Section::new(Some("Title".into()), "first\nsecond")]);
    }

    #[test]
    fn test_list_items_become_lines() {
        let html = "<body><h3>Steps</h3><ol><li>Open</li><li> </li><li>Share</li></ol></body>";
        let sections = extract_sections(html, &no_filter());
        assert_eq!(sections, vec![Section::new(Some("Steps".into()), "Open\nShare")]);
    }

    #[test]
    fn test_paragraph_inside_list_item_not_duplicated() {
        let html = "<body><ul><li><p>Nested</p></li></ul></body>";
        let sections = extract_sections(html, &no_filter());
        assert_eq!(sections, vec![Section::new(None, "Nested")]);
    }

    #[test]
    fn test_script_and_style_are_skipped() {
        let html = "<body><script>var p = '<p>x</p>';</script><style>p{}</style><p>real</p></body>";
        let sections = extract_sections(html, &no_filter());
        assert_eq!(sections, vec![Section::new(None, "real")]);
    }

    #[test]
    fn test_boilerplate_heading_does_not_open_section() {
        let filter = BoilerplateFilter::from_phrases(["Templates"]);
        let html = "<body><h2>Intro</h2><p>a</p><h2>Templates</h2><p>b</p></body>";
        let sections = extract_sections(html, &filter);
        assert_eq!(sections, vec![Section::new(Some("Intro".into()), "a\nb")]);
    }

    #[test]
    fn test_h4_and_div_text_ignored() {
        let html = "<body><h4>Minor</h4><div>loose text</div><span>inline</span></body>";
        assert!(extract_sections(html, &no_filter()).is_empty());
    }

    #[test]
    fn test_document_title_captured() {
        let html = "<html><head><title>Share a page</title></head><body><p>x</p></body></html>";
        let doc = extract_document(html, &no_filter());
        assert_eq!(doc.title.as_deref(), Some("Share a page"));
        assert!(!doc.is_empty());
    }
}
