//! Section extraction module.
//!
//! # Module Structure
//!
//! - `tags`: Allow-listed content tags and their roles
//! - `state`: Open/closed section accumulation
//! - `sections`: Document walk producing ordered sections
//!
//! # Usage
//!
//! ```rust
//! use helpchunk::extractor::extract_sections;
//! use helpchunk::BoilerplateFilter;
//!
//! let html = "<body><h2>FAQ</h2><p>Answers.</p><p>Log in</p></body>";
//! let filter = BoilerplateFilter::from_phrases(["Log in"]);
//! let sections = extract_sections(html, &filter);
//!
//! assert_eq!(sections.len(), 1);
//! assert_eq!(sections[0].body, "Answers.");
//! ```

pub mod sections;
pub mod state;
pub mod tags;

pub use sections::{extract_document, extract_sections, ExtractedDocument};
pub use state::SectionState;
