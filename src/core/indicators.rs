//! Bounded indicator snapshot derived from one file's tool output.

use serde::{Deserialize, Serialize};

/// A keyword with its merged occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: u64,
}

impl KeywordCount {
    pub fn new(keyword: impl Into<String>, count: u64) -> Self {
        Self {
            keyword: keyword.into(),
            count,
        }
    }
}

/// Every indicator the extractor derived for one analyzed file.
///
/// All sequences are capped by the extraction limits and free of
/// duplicates. For documents, `has_macros` reflects extracted VBA modules;
/// for console-harvested categories it means active content was observed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub has_macros: bool,
    pub macro_count: u64,
    pub total_code_bytes: u64,
    pub autoexec_detected: bool,
    pub external_exec_detected: bool,
    /// Matched obfuscation keyword names in first-seen order
    pub obfuscation_signals: Vec<String>,
    /// Highest-count keywords, ties in first-seen order
    pub top_keywords: Vec<KeywordCount>,
    pub urls: Vec<String>,
    pub base64_suspects: Vec<String>,
    pub embedded_object_lines: Vec<String>,
}

impl IndicatorSet {
    /// True when nothing at all was observed.
    pub fn is_empty(&self) -> bool {
        !self.has_macros
            && self.top_keywords.is_empty()
            && self.urls.is_empty()
            && self.base64_suspects.is_empty()
            && self.embedded_object_lines.is_empty()
    }
}
