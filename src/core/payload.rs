//! Payload handed to the external generator.

use super::assessment::RiskScore;
use super::indicators::IndicatorSet;
use super::raw::FileCategory;
use serde::{Deserialize, Serialize};

/// Indicators plus deterministic score for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredPayload {
    pub file: String,
    pub category: FileCategory,
    pub indicators: IndicatorSet,
    pub risk: RiskScore,
    /// Guidance appended for the generator, taken from prompt config
    pub summary_hint: String,
}

impl ScoredPayload {
    /// User message for the generator: file name followed by the payload JSON.
    pub fn to_user_message(&self) -> String {
        let body = serde_json::to_string_pretty(self).unwrap_or_default();
        format!("File: {}\n\nAnalysis:\n{}", self.file, body)
    }
}
