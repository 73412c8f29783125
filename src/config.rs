//! Crawl configuration.
//!
//! Everything a crawl needs (base URL, output directory, request headers,
//! pool size, chunking bounds, link rules and the boilerplate phrase list) is
//! carried in one `CrawlConfig` value passed to the pipeline. Configs can be
//! loaded from JSON; missing fields take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::boilerplate::{BoilerplateFilter, HELP_CENTER_PHRASES};
use crate::error::{Error, Result};
use crate::fetch::{FetchConfig, RetryPolicy, DEFAULT_USER_AGENT};
use crate::links::LinkRule;
use crate::options::{ChunkOptions, OversizePolicy, DEFAULT_MAX_CHUNK_LENGTH};
use crate::sink::{DEFAULT_MAX_NAME_LEN, MAX_NAME_LEN};
use crate::url_utils::parse_url;

/// Configuration for a crawl run.
///
/// # Example
///
/// ```rust
/// use helpchunk::CrawlConfig;
///
/// let config: CrawlConfig = serde_json::from_str(
///     r#"{ "base_url": "https://example.com/help", "max_workers": 4 }"#,
/// )?;
/// assert_eq!(config.max_workers, 4);
/// assert_eq!(config.max_chunk_length, 750);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Index page whose links are crawled; also the base for relative links.
    ///
    /// Default: `https://www.notion.so/help`
    pub base_url: String,

    /// Directory chunk files are written to.
    ///
    /// Default: `./chunks`
    pub output_dir: PathBuf,

    /// `User-Agent` header for every request.
    pub user_agent: String,

    /// Maximum number of documents in flight at once.
    ///
    /// Default: `10`
    pub max_workers: usize,

    /// Maximum chunk length in characters.
    ///
    /// Default: `750`
    pub max_chunk_length: usize,

    /// Handling of sections longer than `max_chunk_length`.
    ///
    /// Default: `keep_intact`
    pub oversize_policy: OversizePolicy,

    /// Link path prefixes that qualify as articles.
    ///
    /// Default: `["/help/"]`
    pub include_prefixes: Vec<String>,

    /// Link path prefixes that never qualify.
    ///
    /// Default: `["/help/guides", "#"]`
    pub exclude_prefixes: Vec<String>,

    /// Phrases marking navigation/marketing text to drop.
    pub boilerplate_phrases: Vec<String>,

    /// Retries for transient fetch failures.
    ///
    /// Default: `3`
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds, doubled per retry.
    ///
    /// Default: `500`
    pub retry_backoff_ms: u64,

    /// Per-request timeout in seconds.
    ///
    /// Default: `30`
    pub timeout_secs: u64,

    /// Cap on the sanitized document name in bytes, at most
    /// [`MAX_NAME_LEN`] so chunk file names stay within filesystem limits.
    ///
    /// Default: `100`
    pub max_file_name_len: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        let links = LinkRule::default();
        Self {
            base_url: "https://www.notion.so/help".to_string(),
            output_dir: PathBuf::from("chunks"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_workers: 10,
            max_chunk_length: DEFAULT_MAX_CHUNK_LENGTH,
            oversize_policy: OversizePolicy::KeepIntact,
            include_prefixes: links.include_prefixes,
            exclude_prefixes: links.exclude_prefixes,
            boilerplate_phrases: HELP_CENTER_PHRASES.iter().map(ToString::to_string).collect(),
            max_retries: 3,
            retry_backoff_ms: 500,
            timeout_secs: 30,
            max_file_name_len: DEFAULT_MAX_NAME_LEN,
        }
    }
}

impl CrawlConfig {
    /// Load a config from a JSON file. Fields not present keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        Ok(config)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_length == 0 {
            return Err(Error::InvalidConfig(
                "max_chunk_length must be greater than zero".to_string(),
            ));
        }
        if self.max_workers == 0 {
            return Err(Error::InvalidConfig(
                "max_workers must be greater than zero".to_string(),
            ));
        }
        if self.max_file_name_len == 0 || self.max_file_name_len > MAX_NAME_LEN {
            return Err(Error::InvalidConfig(format!(
                "max_file_name_len must be between 1 and {MAX_NAME_LEN} bytes"
            )));
        }
        if parse_url(&self.base_url).is_none() {
            return Err(Error::InvalidConfig(format!(
                "base_url is not an absolute http(s) URL: {}",
                self.base_url
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn chunk_options(&self) -> ChunkOptions {
        ChunkOptions {
            max_length: self.max_chunk_length,
            oversize_policy: self.oversize_policy,
        }
    }

    #[must_use]
    pub fn link_rule(&self) -> LinkRule {
        LinkRule {
            include_prefixes: self.include_prefixes.clone(),
            exclude_prefixes: self.exclude_prefixes.clone(),
        }
    }

    #[must_use]
    pub fn boilerplate_filter(&self) -> BoilerplateFilter {
        BoilerplateFilter::from_phrases(&self.boilerplate_phrases)
    }

    #[must_use]
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                backoff: Duration::from_millis(self.retry_backoff_ms),
            },
        }
    }
}
