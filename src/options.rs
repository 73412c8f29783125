//! Configuration options for chunking.
//!
//! The `ChunkOptions` struct controls how sections are packed into chunks:
//! the length bound and what to do with a section that cannot fit.

use serde::{Deserialize, Serialize};

/// Default maximum chunk length in characters.
pub const DEFAULT_MAX_CHUNK_LENGTH: usize = 750;

/// What the chunker does with a section longer than `max_length` on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversizePolicy {
    /// Emit the section as a single oversized chunk. Nothing is truncated.
    #[default]
    KeepIntact,

    /// Split the section greedily on body-line boundaries.
    ///
    /// The title stays attached to the first line. A single line longer than
    /// the bound is still emitted whole.
    SplitOnLines,
}

/// Configuration options for chunking.
///
/// # Example
///
/// ```rust
/// use helpchunk::{ChunkOptions, OversizePolicy};
///
/// let options = ChunkOptions {
///     max_length: 500,
///     ..ChunkOptions::default()
/// };
/// assert_eq!(options.oversize_policy, OversizePolicy::KeepIntact);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkOptions {
    /// Maximum chunk length in characters. Must be greater than zero.
    ///
    /// Default: `750`
    pub max_length: usize,

    /// Handling of sections that exceed `max_length` by themselves.
    ///
    /// Default: `OversizePolicy::KeepIntact`
    pub oversize_policy: OversizePolicy,
}

impl ChunkOptions {
    /// Options with the given bound and the default oversize policy.
    #[must_use]
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            max_length,
            ..Self::default()
        }
    }
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_CHUNK_LENGTH,
            oversize_policy: OversizePolicy::KeepIntact,
        }
    }
}
