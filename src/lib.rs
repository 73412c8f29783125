//! # helpchunk
//!
//! Help-center article extraction and section-aware chunking.
//!
//! A page is walked for headings, paragraphs and lists; navigation and
//! marketing text is dropped by a phrase-based [`BoilerplateFilter`]; the
//! remaining prose is grouped into titled [`Section`]s and packed into
//! length-bounded [`Chunk`]s that never separate a heading from its body.
//!
//! ## Quick Start
//!
//! ```rust
//! use helpchunk::{chunk, extract, BoilerplateFilter, ChunkOptions};
//!
//! let html = r#"<html><body>
//!   <nav><p>Request a demo</p></nav>
//!   <h2>Getting started</h2><p>Create your first page.</p>
//!   <h2>FAQ</h2><p>Pages can be shared.</p>
//! </body></html>"#;
//!
//! let sections = extract(html, &BoilerplateFilter::help_center());
//! let chunks = chunk(&sections, &ChunkOptions::default())?;
//!
//! assert_eq!(sections.len(), 2);
//! assert_eq!(chunks.len(), 1);
//! assert!(!chunks[0].text.contains("Request a demo"));
//! # Ok::<(), helpchunk::Error>(())
//! ```
//!
//! ## Crawling
//!
//! [`Pipeline`] wires the core to a [`DocumentSource`] (e.g. [`HttpFetcher`])
//! and a [`ChunkSink`] (e.g. [`FileSink`]) and runs documents on a bounded
//! worker pool. The `helpcrawl` binary is a thin CLI over it.

mod chunker;
mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Section extraction (tag catalogs, section state, document walk).
pub mod extractor;

/// Phrase-based boilerplate filter.
pub mod boilerplate;

/// Crawl configuration.
pub mod config;

/// Response body decoding.
pub mod encoding;

/// Document source trait and HTTP fetcher.
pub mod fetch;

/// Article link discovery.
pub mod links;

/// Fetch/extract/chunk/save orchestration.
pub mod pipeline;

/// Chunk persistence and file naming.
pub mod sink;

/// URL utilities for resolution and normalization.
pub mod url_utils;

// Public API - re-exports
pub use boilerplate::BoilerplateFilter;
pub use chunker::chunk;
pub use config::CrawlConfig;
pub use error::{Error, Result};
pub use extractor::ExtractedDocument;
pub use fetch::{DocumentSource, FetchError, HttpFetcher};
pub use links::{discover_links, LinkRule};
pub use options::{ChunkOptions, OversizePolicy};
pub use pipeline::{DocumentOutcome, Pipeline, RunSummary};
pub use result::{Chunk, Section, LINE_SEPARATOR, SECTION_SEPARATOR};
pub use sink::{ChunkSink, FileSink};

/// Extracts ordered sections from markup.
///
/// Returns an empty vector when no content element survives; that means "no
/// content", not failure, and callers should skip persistence.
///
/// # Example
///
/// ```rust
/// use helpchunk::{extract, BoilerplateFilter};
///
/// let html = "<body><p>Lead.</p><h2>Setup</h2><p>Install.</p></body>";
/// let sections = extract(html, &BoilerplateFilter::none());
///
/// assert_eq!(sections[0].title, None);
/// assert_eq!(sections[1].title.as_deref(), Some("Setup"));
/// ```
#[must_use]
pub fn extract(html: &str, filter: &BoilerplateFilter) -> Vec<Section> {
    extractor::extract_sections(html, filter)
}

/// Extracts sections and packs them into chunks in one call.
///
/// # Example
///
/// ```rust
/// use helpchunk::{extract_and_chunk, BoilerplateFilter, ChunkOptions};
///
/// let chunks = extract_and_chunk("", &BoilerplateFilter::none(), &ChunkOptions::default())?;
/// assert!(chunks.is_empty());
/// # Ok::<(), helpchunk::Error>(())
/// ```
pub fn extract_and_chunk(
    html: &str,
    filter: &BoilerplateFilter,
    options: &ChunkOptions,
) -> Result<Vec<Chunk>> {
    chunk(&extract(html, filter), options)
}

/// Extracts main content from HTML bytes, decoding the charset first.
///
/// # Example
///
/// ```rust
/// use helpchunk::{extract_bytes, BoilerplateFilter};
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>Caf\xE9</p></body></html>";
/// let sections = extract_bytes(html, &BoilerplateFilter::none());
/// assert_eq!(sections[0].body, "Café");
/// ```
#[must_use]
pub fn extract_bytes(html: &[u8], filter: &BoilerplateFilter) -> Vec<Section> {
    let html = encoding::decode_body(html, None);
    extract(&html, filter)
}
