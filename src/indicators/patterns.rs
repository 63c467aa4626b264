//! Precompiled patterns for the free-text scan of tool console output.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;

/// http/https URLs with at least six characters after the scheme.
pub static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)https?://[^\s'"<>]{6,}"#).expect("valid URL regex"));

/// Runs of base64 alphabet long enough to be worth a second look.
pub static RE_BASE64: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[A-Za-z0-9+/]{20,}={0,2}"#).expect("valid base64 regex"));

/// Markers the embedded-object tool prints on lines describing an object.
pub const EMBEDDED_MARKERS: &[&str] = &["Class", "Format", "Type", "Embedded", "Package"];

static EMBEDDED_AC: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasickBuilder::new()
        .match_kind(MatchKind::LeftmostFirst)
        .build(EMBEDDED_MARKERS)
        .expect("valid embedded marker automaton")
});

/// True when the line mentions any embedded-object marker.
pub fn has_embedded_marker(line: &str) -> bool {
    EMBEDDED_AC.is_match(line)
}

/// Cut `text` to at most `max_chars` characters, on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
