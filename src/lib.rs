//! SafeScan analysis core.
//!
//! Turns raw static-inspection tool output into bounded indicators and a
//! deterministic risk score, hands them to an external summarizer, and
//! normalizes whatever comes back into a strict assessment JSON object.

/// Core data types module
pub mod core;

/// Pipeline configuration
pub mod config;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod pipeline;
pub mod response;
pub mod scoring;
pub mod summarizer;
pub mod timeout;

pub use crate::config::SafescanConfig;
pub use crate::core::{
    FileCategory, IndicatorSet, RawAnalysisResult, RiskAssessment, RiskLevel, RiskScore,
    ScoredPayload,
};
pub use crate::error::{Result, SafescanError};
pub use crate::logging::{init_tracing, LogFormat, LoggingConfig};
pub use crate::pipeline::Pipeline;
pub use crate::response::{normalize_response, FallbackGenerator};
pub use crate::summarizer::{Summarizer, SummaryRequest};
pub use crate::timeout::{cancel_pair, CancelSource, CancelToken};
