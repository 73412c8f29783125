//! Crawl pipeline.
//!
//! Per document: fetch → extract → chunk → save. Documents run concurrently
//! on a bounded `rayon` pool; one document failing never stops the others.
//! Every document gets a file name no other document of the pipeline uses.

use std::collections::HashSet;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;
use tracing::{debug, info, warn};
use url::Url;

use crate::boilerplate::BoilerplateFilter;
use crate::chunker::chunk;
use crate::config::CrawlConfig;
use crate::error::{Error, Result};
use crate::extractor::{extract_document, extract_sections};
use crate::fetch::{DocumentSource, FetchError};
use crate::links::{discover_links, LinkRule};
use crate::options::ChunkOptions;
use crate::result::Chunk;
use crate::sink::{alternate_names, chunk_file_name, document_name, sanitize_file_name, ChunkSink};

/// What happened to one document.
#[derive(Debug)]
pub enum DocumentOutcome {
    /// All chunks were written.
    Saved { name: String, chunks: usize },
    /// No content survived extraction; nothing was written.
    Empty,
    /// The document could not be fetched.
    FetchFailed(FetchError),
    /// Chunking rejected the extracted sections (invalid chunk options).
    ChunkFailed(Error),
    /// Writing a chunk failed after `saved` chunks had been written.
    SaveFailed { saved: usize, error: Error },
}

/// Counters for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub documents: usize,
    pub saved_documents: usize,
    pub chunks_written: usize,
    pub empty: usize,
    pub fetch_failures: usize,
    pub chunk_failures: usize,
    pub save_failures: usize,
}

impl RunSummary {
    /// Documents that did not end up persisted for any reason.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.empty + self.fetch_failures + self.chunk_failures + self.save_failures
    }
}

#[derive(Default)]
struct Counters {
    documents: AtomicUsize,
    saved_documents: AtomicUsize,
    chunks_written: AtomicUsize,
    empty: AtomicUsize,
    fetch_failures: AtomicUsize,
    chunk_failures: AtomicUsize,
    save_failures: AtomicUsize,
}

impl Counters {
    fn record(&self, outcome: &DocumentOutcome) {
        self.documents.fetch_add(1, Ordering::Relaxed);
        match outcome {
            DocumentOutcome::Saved { chunks, .. } => {
                self.saved_documents.fetch_add(1, Ordering::Relaxed);
                self.chunks_written.fetch_add(*chunks, Ordering::Relaxed);
            }
            DocumentOutcome::Empty => {
                self.empty.fetch_add(1, Ordering::Relaxed);
            }
            DocumentOutcome::FetchFailed(_) => {
                self.fetch_failures.fetch_add(1, Ordering::Relaxed);
            }
            DocumentOutcome::ChunkFailed(_) => {
                self.chunk_failures.fetch_add(1, Ordering::Relaxed);
            }
            DocumentOutcome::SaveFailed { saved, .. } => {
                self.save_failures.fetch_add(1, Ordering::Relaxed);
                self.chunks_written.fetch_add(*saved, Ordering::Relaxed);
            }
        }
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            documents: self.documents.load(Ordering::Relaxed),
            saved_documents: self.saved_documents.load(Ordering::Relaxed),
            chunks_written: self.chunks_written.load(Ordering::Relaxed),
            empty: self.empty.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            chunk_failures: self.chunk_failures.load(Ordering::Relaxed),
            save_failures: self.save_failures.load(Ordering::Relaxed),
        }
    }
}

/// Extraction, chunking and persistence wired to a source and a sink.
pub struct Pipeline<S, K> {
    source: S,
    sink: K,
    base_url: Url,
    filter: BoilerplateFilter,
    chunk_options: ChunkOptions,
    link_rule: LinkRule,
    max_workers: usize,
    max_name_len: usize,
    claimed_names: Mutex<HashSet<String>>,
}

impl<S: DocumentSource, K: ChunkSink> Pipeline<S, K> {
    /// Build a pipeline from a validated config.
    pub fn new(config: &CrawlConfig, source: S, sink: K) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::InvalidConfig(format!("base_url: {e}")))?;

        Ok(Self {
            source,
            sink,
            base_url,
            filter: config.boilerplate_filter(),
            chunk_options: config.chunk_options(),
            link_rule: config.link_rule(),
            max_workers: config.max_workers,
            max_name_len: config.max_file_name_len,
            claimed_names: Mutex::default(),
        })
    }

    /// Extract and chunk one document's markup. Pure; no I/O.
    pub fn process_markup(&self, html: &str) -> Result<Vec<Chunk>> {
        let sections = extract_sections(html, &self.filter);
        chunk(&sections, &self.chunk_options)
    }

    /// Fetch, chunk and persist one document.
    pub fn process_url(&self, url: &str) -> DocumentOutcome {
        let html = match self.source.fetch(url) {
            Ok(html) => html,
            Err(err) => {
                warn!(url, error = %err, transient = err.is_transient(), "fetch failed, skipping document");
                return DocumentOutcome::FetchFailed(err);
            }
        };

        let document = extract_document(&html, &self.filter);
        if document.is_empty() {
            warn!(url, "no content extracted, skipping document");
            return DocumentOutcome::Empty;
        }

        let chunks = match chunk(&document.sections, &self.chunk_options) {
            Ok(chunks) => chunks,
            Err(error) => {
                warn!(url, error = %error, "chunking failed, skipping document");
                return DocumentOutcome::ChunkFailed(error);
            }
        };

        let base = sanitize_file_name(
            &document_name(&document.sections, document.title.as_deref(), url),
            self.max_name_len,
        );

        for name in alternate_names(&base, url, self.max_name_len) {
            if !self.claim_name(&name) {
                continue;
            }
            match self.save_chunks(&chunks, &name) {
                Ok(()) => {
                    debug!(url, name = %name, chunks = chunks.len(), "document saved");
                    return DocumentOutcome::Saved {
                        name,
                        chunks: chunks.len(),
                    };
                }
                Err((0, error)) if error.is_already_exists() => {
                    debug!(url, name = %name, "chunk file already exists, trying another name");
                }
                Err((saved, error)) => {
                    warn!(url, error = %error, saved, "failed to save chunk");
                    return DocumentOutcome::SaveFailed { saved, error };
                }
            }
        }

        warn!(url, base = %base, "no free file name, skipping document");
        DocumentOutcome::SaveFailed {
            saved: 0,
            error: Error::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("no free file name for {base}"),
            )),
        }
    }

    /// Reserve `name` for one document; false if another document has it.
    fn claim_name(&self, name: &str) -> bool {
        self.claimed_names
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string())
    }

    /// Save every chunk under `name`; on failure, report how many were saved.
    fn save_chunks(&self, chunks: &[Chunk], name: &str) -> std::result::Result<(), (usize, Error)> {
        for (index, piece) in chunks.iter().enumerate() {
            self.sink
                .save(piece, &chunk_file_name(name, index))
                .map_err(|error| (index, error))?;
        }
        Ok(())
    }

    /// Process `urls` with at most `max_workers` documents in flight.
    pub fn run<I>(&self, urls: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = String>,
    {
        let urls: Vec<String> = urls.into_iter().collect();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .thread_name(|i| format!("helpchunk-worker-{i}"))
            .build()
            .map_err(|e| Error::InvalidConfig(format!("worker pool: {e}")))?;

        info!(documents = urls.len(), workers = self.max_workers, "starting run");

        let counters = Counters::default();
        pool.install(|| {
            urls.par_iter().for_each(|url| {
                let outcome = self.process_url(url);
                counters.record(&outcome);
            });
        });

        let summary = counters.summary();
        info!(
            documents = summary.documents,
            saved = summary.saved_documents,
            chunks = summary.chunks_written,
            empty = summary.empty,
            fetch_failures = summary.fetch_failures,
            chunk_failures = summary.chunk_failures,
            save_failures = summary.save_failures,
            "run complete"
        );
        Ok(summary)
    }

    /// Fetch the index page, discover article links and process them all.
    ///
    /// # Errors
    ///
    /// Fails only if the index page itself cannot be fetched or the worker
    /// pool cannot be built.
    pub fn crawl(&self) -> Result<RunSummary> {
        let index = self.source.fetch(self.base_url.as_str())?;
        let links = discover_links(&index, &self.base_url, &self.link_rule);
        info!(base = %self.base_url, articles = links.len(), "discovered articles");
        self.run(links)
    }
}
