//! Canonical degraded assessments for failed or empty generator calls.

use crate::config::SummarizerConfig;
use crate::core::RiskAssessment;
use crate::indicators::patterns::truncate_chars;

pub const EMPTY_SUMMARY: &str = "Could not produce an analysis result.";
pub const QUOTA_SUMMARY: &str =
    "The summarization service quota has been exceeded. Please try again shortly.";
pub const QUOTA_REASON: &str = "AI analysis could not run because the service quota was exceeded";
pub const ERROR_SUMMARY: &str = "An error occurred during AI analysis.";
pub const ACTION_USE_STATIC: &str = "Refer to the static analysis results";
pub const ACTION_RETRY_LATER: &str = "Retry in a minute or raise the service quota";

/// Which fallback a failure maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Quota,
    Other,
}

/// Builds fallback assessments; error classification is configurable.
#[derive(Debug, Clone)]
pub struct FallbackGenerator {
    excerpt_chars: usize,
    quota_markers: Vec<String>,
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new(&SummarizerConfig::default())
    }
}

impl FallbackGenerator {
    pub fn new(config: &SummarizerConfig) -> Self {
        Self {
            excerpt_chars: config.error_excerpt_chars,
            quota_markers: config
                .quota_markers
                .iter()
                .map(|m| m.to_lowercase())
                .filter(|m| !m.is_empty())
                .collect(),
        }
    }

    /// Case-insensitive search for any quota marker.
    pub fn classify(&self, error_text: &str) -> FailureKind {
        let lowered = error_text.to_lowercase();
        if self.quota_markers.iter().any(|m| lowered.contains(m.as_str())) {
            FailureKind::Quota
        } else {
            FailureKind::Other
        }
    }

    pub fn empty_assessment() -> RiskAssessment {
        RiskAssessment::low(EMPTY_SUMMARY)
    }

    pub fn quota_assessment() -> RiskAssessment {
        RiskAssessment::low(QUOTA_SUMMARY)
            .with_reason(QUOTA_REASON)
            .with_action(ACTION_USE_STATIC)
            .with_action(ACTION_RETRY_LATER)
    }

    pub fn error_assessment(&self, error_text: &str) -> RiskAssessment {
        RiskAssessment::low(ERROR_SUMMARY)
            .with_reason(format!(
                "Error: {}",
                truncate_chars(error_text, self.excerpt_chars)
            ))
            .with_action(ACTION_USE_STATIC)
    }

    pub fn empty() -> String {
        Self::empty_assessment().to_json()
    }

    pub fn quota() -> String {
        Self::quota_assessment().to_json()
    }

    pub fn error(&self, error_text: &str) -> String {
        self.error_assessment(error_text).to_json()
    }

    /// Quota or generic fallback, chosen from the error text.
    pub fn for_error(&self, error_text: &str) -> String {
        match self.classify(error_text) {
            FailureKind::Quota => Self::quota(),
            FailureKind::Other => self.error(error_text),
        }
    }
}
