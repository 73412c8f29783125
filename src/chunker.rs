//! Section-aware chunking.
//!
//! Sections are packed greedily into chunks of at most `max_length`
//! characters, joined by [`SECTION_SEPARATOR`]. A section is never split
//! across chunks unless it is longer than the bound on its own, in which case
//! [`OversizePolicy`] decides what happens.

use crate::error::{Error, Result};
use crate::options::{ChunkOptions, OversizePolicy};
use crate::result::{Chunk, Section, LINE_SEPARATOR, SECTION_SEPARATOR};

/// Pack ordered sections into length-bounded chunks.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] if `options.max_length` is zero.
///
/// # Example
///
/// ```rust
/// use helpchunk::{chunk, ChunkOptions, Section};
///
/// let sections = vec![
///     Section::new(Some("Getting started".into()), "Create a page."),
///     Section::new(Some("FAQ".into()), "Ask anything."),
/// ];
/// let chunks = chunk(&sections, &ChunkOptions::default())?;
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(
///     chunks[0].text,
///     "Getting started\nCreate a page.\n\nFAQ\nAsk anything."
/// );
/// # Ok::<(), helpchunk::Error>(())
/// ```
pub fn chunk(sections: &[Section], options: &ChunkOptions) -> Result<Vec<Chunk>> {
    if options.max_length == 0 {
        return Err(Error::InvalidConfig(
            "max_length must be greater than zero".to_string(),
        ));
    }

    let mut packer = Packer::new(options.max_length);

    for section in sections.iter().filter(|s| !s.is_empty()) {
        let len = section.rendered_len();

        if len > options.max_length {
            packer.flush();
            match options.oversize_policy {
                OversizePolicy::KeepIntact => packer.emit_oversized(section.render()),
                OversizePolicy::SplitOnLines => {
                    for piece in split_on_lines(section, options.max_length) {
                        let oversized = piece.chars().count() > options.max_length;
                        packer.emit(piece, oversized);
                    }
                }
            }
            continue;
        }

        packer.push(section.render(), len);
    }

    Ok(packer.finish())
}

/// Greedy accumulator for chunk text.
struct Packer {
    max_length: usize,
    text: String,
    len: usize,
    sections: usize,
    chunks: Vec<Chunk>,
}

impl Packer {
    fn new(max_length: usize) -> Self {
        Self {
            max_length,
            text: String::new(),
            len: 0,
            sections: 0,
            chunks: Vec::new(),
        }
    }

    /// Append a rendered section, closing the current chunk first if it would
    /// overflow.
    fn push(&mut self, rendered: String, len: usize) {
        if self.sections > 0 && self.len + SECTION_SEPARATOR.len() + len > self.max_length {
            self.flush();
        }

        if self.sections > 0 {
            self.text.push_str(SECTION_SEPARATOR);
            self.len += SECTION_SEPARATOR.len();
        }
        self.text.push_str(&rendered);
        self.len += len;
        self.sections += 1;
    }

    fn emit(&mut self, text: String, oversized: bool) {
        self.chunks.push(Chunk {
            text,
            sections: 1,
            oversized,
        });
    }

    fn emit_oversized(&mut self, text: String) {
        self.emit(text, true);
    }

    fn flush(&mut self) {
        if self.sections == 0 {
            return;
        }
        self.chunks.push(Chunk {
            text: std::mem::take(&mut self.text),
            sections: self.sections,
            oversized: false,
        });
        self.len = 0;
        self.sections = 0;
    }

    fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }
}

/// Split an oversized section on body-line boundaries.
///
/// Lines are packed greedily with [`LINE_SEPARATOR`]; the title is the first
/// line of the first piece. Joining the pieces with `LINE_SEPARATOR`
/// reproduces the rendered section exactly.
fn split_on_lines(section: &Section, max_length: usize) -> Vec<String> {
    let title = section.title.as_deref().filter(|t| !t.is_empty());
    let lines = title.into_iter().chain(section.lines());

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in lines {
        let line_len = line.chars().count();
        if !current.is_empty() && current_len + LINE_SEPARATOR.len() + line_len > max_length {
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push_str(LINE_SEPARATOR);
            current_len += LINE_SEPARATOR.len();
        }
        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}
