//! Token cleanup for raw pattern captures.

use regex::Regex;

use super::patterns::{ANCHOR_MARKER, INTERWIKI_MARKER, LABEL_SEPARATOR};

/// Reduce the inside of `[[...]]` to a bare reference.
///
/// Keeps the part before any `|` label and `#` anchor, trimmed. Returns
/// `None` for empty targets, URLs and interwiki shortcuts.
pub fn link_target(inner: &str, external: &Regex) -> Option<String> {
    let target = inner.split(LABEL_SEPARATOR).next().unwrap_or("");
    let target = target.split(ANCHOR_MARKER).next().unwrap_or("").trim();

    if target.is_empty() || external.is_match(target) || target.contains(INTERWIKI_MARKER) {
        return None;
    }

    Some(target.to_string())
}

/// Whitespace-separated tokens of a tag marker body.
pub fn tag_tokens(body: &str) -> impl Iterator<Item = &str> {
    body.split_whitespace().map(str::trim).filter(|t| !t.is_empty())
}

/// Heading text with stray `=` trimmed, if anything is left.
///
/// A bare `======` rule matches the heading pattern with a capture of `=`,
/// which must not become a title.
pub fn heading_title(text: &str) -> Option<String> {
    let title = text.trim_matches(|c: char| c == '=' || c.is_whitespace());
    (!title.is_empty()).then(|| title.to_string())
}
