//! Persistence sink.
//!
//! Chunks are written as plain UTF-8 text files named after their document:
//! `{name}_part_{n}.txt`, with `n` starting at 1. Existing files are never
//! overwritten.

use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::patterns::{collapse_whitespace, UNSAFE_FILE_CHARS};
use crate::result::{Chunk, Section};
use crate::url_utils::last_path_segment;

/// Name used when nothing better is available.
pub const UNTITLED: &str = "untitled";

/// Default cap on a sanitized document name, in bytes.
pub const DEFAULT_MAX_NAME_LEN: usize = 100;

/// Byte limit common filesystems place on one file name.
pub const FILE_NAME_BYTE_LIMIT: usize = 255;

/// Longest suffix [`chunk_file_name`] appends (`_part_` + `u64::MAX` + `.txt`).
pub const MAX_PART_SUFFIX_LEN: usize = "_part_".len() + 20 + ".txt".len();

/// Largest document-name cap that still leaves room for the part suffix.
pub const MAX_NAME_LEN: usize = FILE_NAME_BYTE_LIMIT - MAX_PART_SUFFIX_LEN;

/// Numbered alternates tried after the base name and the URL-segment name.
const MAX_NUMBERED_ALTERNATES: usize = 98;

/// Capability to persist one chunk.
pub trait ChunkSink: Send + Sync {
    /// Persist `chunk` under `name` (a file name, not a path).
    ///
    /// Must fail with an [`std::io::ErrorKind::AlreadyExists`] I/O error
    /// rather than replace an existing chunk.
    fn save(&self, chunk: &Chunk, name: &str) -> Result<PathBuf>;
}

/// Writes chunks into a directory, one file per chunk.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Create the sink, creating `dir` and its parents if missing.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ChunkSink for FileSink {
    fn save(&self, chunk: &Chunk, name: &str) -> Result<PathBuf> {
        let path = self.dir.join(name);
        let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
        file.write_all(chunk.text.as_bytes())?;
        debug!(path = %path.display(), chars = chunk.len(), "saved chunk");
        Ok(path)
    }
}

/// Pick the base name for a document's chunks.
///
/// First non-empty section title, then the page `<title>`, then the last URL
/// path segment, then [`UNTITLED`].
#[must_use]
pub fn document_name(sections: &[Section], page_title: Option<&str>, url: &str) -> String {
    sections
        .iter()
        .filter_map(|s| s.title.as_deref())
        .find(|t| !t.trim().is_empty())
        .map(ToString::to_string)
        .or_else(|| page_title.filter(|t| !t.trim().is_empty()).map(ToString::to_string))
        .or_else(|| last_path_segment(url))
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// Make `name` safe to use as a file name.
///
/// Path separators, reserved punctuation and control characters become `-`,
/// whitespace is collapsed, leading/trailing dots and spaces are trimmed and
/// the result is capped at `max_len` bytes (never more than [`MAX_NAME_LEN`])
/// on a character boundary. Never returns an empty name.
#[must_use]
pub fn sanitize_file_name(name: &str, max_len: usize) -> String {
    let replaced = UNSAFE_FILE_CHARS.replace_all(name, "-");
    let collapsed = collapse_whitespace(&replaced);
    let capped = trim_name(truncate_to_bytes(
        trim_name(&collapsed),
        max_len.min(MAX_NAME_LEN),
    ));

    if capped.is_empty() {
        UNTITLED.to_string()
    } else {
        capped.to_string()
    }
}

/// Names to try for a document, in order: `base`, `base-{last URL segment}`,
/// then `base-2`, `base-3`, ... Every name fits in `max_len` bytes; `base`
/// is shortened to keep the suffix.
#[must_use]
pub fn alternate_names(base: &str, url: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.min(MAX_NAME_LEN);
    let mut names = vec![base.to_string()];

    if let Some(segment) = last_path_segment(url) {
        let segment = sanitize_file_name(&segment, max_len / 2);
        names.push(with_suffix(base, &format!("-{segment}"), max_len));
    }
    names.extend(
        (2..2 + MAX_NUMBERED_ALTERNATES).map(|n| with_suffix(base, &format!("-{n}"), max_len)),
    );

    let mut seen = HashSet::new();
    names.retain(|name| name.len() <= max_len.max(base.len()) && seen.insert(name.clone()));
    names
}

fn with_suffix(base: &str, suffix: &str, max_len: usize) -> String {
    let head = trim_name(truncate_to_bytes(base, max_len.saturating_sub(suffix.len())));
    format!("{head}{suffix}")
}

fn trim_name(name: &str) -> &str {
    name.trim_matches(|c: char| c == '.' || c.is_whitespace())
}

/// Longest prefix of `s` that is at most `max` bytes and ends on a char boundary.
fn truncate_to_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// File name for chunk `index` (0-based) of a document.
#[must_use]
pub fn chunk_file_name(base: &str, index: usize) -> String {
    format!("{base}_part_{}.txt", index + 1)
}
