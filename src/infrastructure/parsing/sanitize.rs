//! Sanitization filter for raw text candidates
//!
//! Rejects text that is empty, oversized, or carries markers of inline script
//! and internal tracking payloads that leak into `textContent`.

use crate::infrastructure::config::defaults::MAX_TEXT_LENGTH;

/// Substrings that only show up in script or tracking payloads
const NON_CONTENT_MARKERS: &[&str] = &["typeof", "function()", "csa(", "AUI_"];

/// Key prefix of serialized internal objects
const INTERNAL_OBJECT_MARKER: &str = "\"AUI_";

/// Validate and trim a raw candidate. Returns `None` when the text is not content.
pub fn clean(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() || text.chars().count() > MAX_TEXT_LENGTH {
        return None;
    }
    if NON_CONTENT_MARKERS.iter().any(|marker| text.contains(marker)) {
        return None;
    }
    if text.starts_with('{') && text.contains(INTERNAL_OBJECT_MARKER) {
        return None;
    }
    Some(text.to_string())
}

/// `clean` for an optional candidate
pub fn clean_opt(text: Option<&str>) -> Option<String> {
    text.and_then(clean)
}

/// Collapse every whitespace run to a single space and trim
pub fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Cut `s` to at most `max` characters on a char boundary
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
