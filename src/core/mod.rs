//! Core data types shared by every pipeline stage.

pub mod assessment;
pub mod indicators;
pub mod payload;
pub mod raw;

pub use assessment::{RiskAssessment, RiskLevel, RiskScore, ScoreContribution, MAX_SCORE};
pub use indicators::{IndicatorSet, KeywordCount};
pub use payload::ScoredPayload;
pub use raw::{FileCategory, KeywordObservation, MacroEntry, RawAnalysisResult, ToolOutput};
