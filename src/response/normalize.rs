//! Recovery of a strict JSON object from free-form generator text.
//!
//! Strategies run in a fixed order and the first candidate that parses as a
//! JSON object wins. Nothing here can fail: when no strategy recovers an
//! object, the canonical empty fallback is returned.

use crate::response::fallback::FallbackGenerator;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Fenced code block, optional `json` tag, holding a lazily matched object.
static RE_FENCED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json)?\s*(\{[\s\S]*?\})\s*```").expect("valid fenced block regex")
});

/// Opening braces tried by the first-balanced strategy before giving up.
pub const MAX_BALANCED_STARTS: usize = 64;

/// Recovery strategies in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Fenced,
    Whole,
    GreedySpan,
    FirstBalanced,
}

impl Strategy {
    pub const ORDER: [Strategy; 4] = [
        Strategy::Fenced,
        Strategy::Whole,
        Strategy::GreedySpan,
        Strategy::FirstBalanced,
    ];

    pub fn apply(self, text: &str) -> Option<String> {
        match self {
            Strategy::Fenced => fenced(text),
            Strategy::Whole => whole(text),
            Strategy::GreedySpan => greedy_span(text),
            Strategy::FirstBalanced => first_balanced(text),
        }
    }
}

/// Outcome of a normalization, with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub json: String,
    /// `None` when the empty fallback was used
    pub strategy: Option<Strategy>,
}

/// Normalize a generator reply into a JSON object string.
pub fn normalize_response(text: &str) -> String {
    normalize_traced(text).json
}

pub fn normalize_traced(text: &str) -> Normalized {
    if text.trim().is_empty() {
        return Normalized {
            json: FallbackGenerator::empty(),
            strategy: None,
        };
    }
    Strategy::ORDER
        .iter()
        .find_map(|s| {
            s.apply(text).map(|json| Normalized {
                json,
                strategy: Some(*s),
            })
        })
        .unwrap_or_else(|| Normalized {
            json: FallbackGenerator::empty(),
            strategy: None,
        })
}

fn is_object(candidate: &str) -> bool {
    matches!(serde_json::from_str::<Value>(candidate), Ok(Value::Object(_)))
}

fn fenced(text: &str) -> Option<String> {
    RE_FENCED
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|candidate| is_object(candidate))
        .map(str::to_string)
}

fn whole(text: &str) -> Option<String> {
    is_object(text).then(|| text.to_string())
}

fn greedy_span(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    let span = text[start..=end].trim();
    is_object(span).then(|| span.to_string())
}

fn first_balanced(text: &str) -> Option<String> {
    // each attempt may parse to the end of the text
    text.match_indices('{').take(MAX_BALANCED_STARTS).find_map(|(start, _)| {
        let rest = &text[start..];
        let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(_))) => Some(rest[..stream.byte_offset()].to_string()),
            _ => None,
        }
    })
}
