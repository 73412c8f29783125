//! URL Utility Functions
//!
//! URL validation, resolution and normalization used by link discovery and
//! for deriving fallback document names.

use url::Url;

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Resolve a relative or absolute href against `base`.
///
/// Returns `None` for special schemes (`mailto:`, `javascript:`, ...) and
/// for hrefs that do not resolve to an http(s) URL.
#[must_use]
pub fn resolve_href(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with("data:")
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return None;
    }

    let resolved = base.join(href).ok()?;
    matches!(resolved.scheme(), "http" | "https").then_some(resolved)
}

/// Normalize a URL by removing the fragment and a trailing slash (unless root).
#[must_use]
pub fn normalize_url(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);

    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(&path[..path.len() - 1]);
    }

    url.to_string()
}

/// True if both URLs share scheme-independent host and port.
#[must_use]
pub fn same_host(a: &Url, b: &Url) -> bool {
    a.host_str() == b.host_str() && a.port_or_known_default() == b.port_or_known_default()
}

/// Last non-empty path segment of a URL, used as a fallback document name.
///
/// # Examples
/// ```
/// use helpchunk::url_utils::last_path_segment;
///
/// assert_eq!(last_path_segment("https://example.com/help/share-a-page"), Some("share-a-page".to_string()));
/// assert_eq!(last_path_segment("https://example.com/help/intro/?x=1#top"), Some("intro".to_string()));
/// assert_eq!(last_path_segment("https://example.com/"), None);
/// ```
#[must_use]
pub fn last_path_segment(url_str: &str) -> Option<String> {
    let url = parse_url(url_str)?;
    url.path_segments()?
        .rev()
        .find(|s| !s.is_empty())
        .map(ToString::to_string)
}
