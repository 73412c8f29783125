//! Response body decoding.
//!
//! Fetched pages arrive as bytes. The charset is taken, in order, from a
//! byte-order mark, the HTTP `Content-Type` header, a `<meta>` declaration in
//! the first 1024 bytes, and finally defaults to UTF-8. Invalid sequences are
//! replaced with U+FFFD rather than failing.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Match `charset=...` inside a header value or a `<meta>` tag.
#[allow(clippy::expect_used)]
static CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("valid regex")
});

/// Match a `<meta ...charset...>` tag (either form).
#[allow(clippy::expect_used)]
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<meta[^>]+charset[^>]*>").expect("valid regex"));

/// Look up the encoding named by a `charset=` parameter in `text`.
fn charset_param(text: &str) -> Option<&'static Encoding> {
    let label = CHARSET_RE.captures(text)?.get(1)?.as_str();
    Encoding::for_label(label.as_bytes())
}

/// Detect the encoding of a response body.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(body) {
        return encoding;
    }

    if let Some(encoding) = content_type.and_then(charset_param) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&body[..body.len().min(1024)]);
    META_TAG_RE
        .find(&head)
        .and_then(|tag| charset_param(tag.as_str()))
        .unwrap_or(UTF_8)
}

/// Decode a response body to a UTF-8 string.
///
/// # Examples
///
/// ```
/// use helpchunk::encoding::decode_body;
///
/// let body = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// assert!(decode_body(body, None).contains("Café"));
/// ```
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    // `decode` strips a matching BOM and replaces malformed sequences.
    let (decoded, _used, _had_errors) = encoding.decode(body);
    decoded.into_owned()
}
