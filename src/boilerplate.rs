//! Boilerplate filter for navigation and marketing chrome.
//!
//! The exclusion policy is plain data: a list of phrases compiled into one
//! case-sensitive alternation. Any element whose text contains one of the
//! phrases is dropped by the extractor.

use regex::Regex;

/// Phrases that mark help-center navigation, menus and calls to action.
pub const HELP_CENTER_PHRASES: [&str; 18] = [
    "Company",
    "Download",
    "Resources",
    "Notion for",
    "AI",
    "Docs",
    "Wikis",
    "Projects",
    "Calendar",
    "Sites",
    "Templates",
    "Product",
    "Personal",
    "Request a demo",
    "Log in",
    "Get Notion free",
    "Help Center",
    "Reference",
];

/// Matcher identifying chrome/navigation text to exclude from content.
#[derive(Debug, Clone)]
pub struct BoilerplateFilter {
    phrases: Vec<String>,
    pattern: Option<Regex>,
}

impl BoilerplateFilter {
    /// A filter that matches nothing.
    #[must_use]
    pub fn none() -> Self {
        Self {
            phrases: Vec::new(),
            pattern: None,
        }
    }

    /// Build a filter from literal phrases.
    ///
    /// Phrases are matched case-sensitively as substrings. Regex
    /// metacharacters in phrases are escaped; empty phrases are ignored.
    #[must_use]
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();

        if phrases.is_empty() {
            return Self::none();
        }

        let alternation = phrases
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");

        // Escaped literals can only fail on the compiled size limit; the
        // phrase scan in `is_boilerplate` covers that case.
        let pattern = match Regex::new(&alternation) {
            Ok(re) => Some(re),
            Err(err) => {
                tracing::warn!(error = %err, phrases = phrases.len(), "boilerplate pattern rejected, scanning phrases instead");
                None
            }
        };

        Self { phrases, pattern }
    }

    /// Wrap an already compiled pattern.
    #[must_use]
    pub fn from_regex(pattern: Regex) -> Self {
        Self {
            phrases: Vec::new(),
            pattern: Some(pattern),
        }
    }

    /// The default help-center filter built from [`HELP_CENTER_PHRASES`].
    #[must_use]
    pub fn help_center() -> Self {
        Self::from_phrases(HELP_CENTER_PHRASES)
    }

    /// True if `text` contains any excluded phrase.
    #[must_use]
    pub fn is_boilerplate(&self, text: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(text),
            None => self.phrases.iter().any(|p| text.contains(p.as_str())),
        }
    }

    /// Phrases this filter was built from (empty for [`from_regex`](Self::from_regex)).
    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }
}

impl Default for BoilerplateFilter {
    fn default() -> Self {
        Self::help_center()
    }
}
