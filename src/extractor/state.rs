//! Section accumulation state.
//!
//! `SectionState` holds the section currently being filled while the
//! extractor walks the document, and the sections already closed.

use crate::result::{Section, LINE_SEPARATOR};

/// Tracks the open section and the finished ones.
#[derive(Debug, Default)]
pub struct SectionState {
    title: Option<String>,
    body: String,
    closed: Vec<Section>,
}

impl SectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the open section and start a new one titled `title`.
    pub fn open_heading(&mut self, title: String) {
        self.close();
        self.title = Some(title);
    }

    /// Append one line of body text to the open section.
    pub fn push_line(&mut self, line: &str) {
        self.body.push_str(line);
        self.body.push_str(LINE_SEPARATOR);
    }

    /// True if the open section has a title or any body text.
    #[must_use]
    pub fn has_content(&self) -> bool {
        self.title.is_some() || !self.body.is_empty()
    }

    /// Move the open section into the closed list if it has content.
    pub fn close(&mut self) {
        if !self.has_content() {
            return;
        }
        let mut body = std::mem::take(&mut self.body);
        let trimmed_len = body.trim_end_matches(LINE_SEPARATOR).len();
        body.truncate(trimmed_len);
        self.closed.push(Section {
            title: self.title.take(),
            body,
        });
    }

    /// Close the open section and return everything in source order.
    #[must_use]
    pub fn finish(mut self) -> Vec<Section> {
        self.close();
        self.closed
    }
}
