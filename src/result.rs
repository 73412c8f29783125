//! Output types of the extraction and chunking stages.
//!
//! A [`Section`] is what the extractor produces for one heading and the prose
//! under it. A [`Chunk`] is what the chunker packs sections into and what the
//! sink finally persists.

use serde::{Deserialize, Serialize};

/// Separator between lines inside one section (title/body and body lines).
pub const LINE_SEPARATOR: &str = "\n";

/// Separator between sections inside one chunk.
///
/// Never appears inside a rendered section, so a chunk can always be split
/// back into the sections it was built from.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// A titled block of extracted document text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, `None` for content that precedes the first heading.
    pub title: Option<String>,

    /// Paragraph and list text belonging to the heading, one element per line.
    pub body: String,
}

impl Section {
    /// Create a section from a title and body.
    #[must_use]
    pub fn new(title: Option<String>, body: impl Into<String>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    /// Title and body joined by [`LINE_SEPARATOR`], omitting whichever is empty.
    #[must_use]
    pub fn render(&self) -> String {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => {
                if self.body.is_empty() {
                    title.to_string()
                } else {
                    format!("{title}{LINE_SEPARATOR}{}", self.body)
                }
            }
            _ => self.body.clone(),
        }
    }

    /// Length of [`Section::render`] in characters.
    #[must_use]
    pub fn rendered_len(&self) -> usize {
        let title_len = self.title.as_deref().map_or(0, |t| t.chars().count());
        let body_len = self.body.chars().count();
        match (title_len, body_len) {
            (0, b) => b,
            (t, 0) => t,
            (t, b) => t + LINE_SEPARATOR.len() + b,
        }
    }

    /// Body lines in source order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.body.split(LINE_SEPARATOR).filter(|l| !l.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.as_deref().is_none_or(str::is_empty) && self.body.is_empty()
    }
}

/// A persistable unit of output text composed of one or more sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Rendered sections joined by [`SECTION_SEPARATOR`].
    pub text: String,

    /// Number of sections (or section pieces) packed into this chunk.
    pub sections: usize,

    /// Set when the chunk exceeds the length bound because a single section
    /// (or a single line, when splitting) was already longer than the bound.
    pub oversized: bool,
}

impl Chunk {
    /// Length of the chunk text in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split the chunk back into the rendered sections it was packed from.
    pub fn section_texts(&self) -> impl Iterator<Item = &str> {
        self.text.split(SECTION_SEPARATOR)
    }
}
