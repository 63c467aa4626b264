//! Deterministic additive risk scoring.
//!
//! Every category is scored by the same engine; only the [`WeightTable`]
//! differs. Terms are evaluated in a fixed order, summed and clamped into
//! `[0, 100]`.

use crate::config::{CategoryOverride, ScoringConfig};
use crate::core::{FileCategory, IndicatorSet, RiskScore, ScoreContribution};
use serde::{Deserialize, Serialize};

pub const SIGNAL_ACTIVE_CONTENT: &str = "active_content";
pub const SIGNAL_AUTOEXEC: &str = "autoexec";
pub const SIGNAL_EXTERNAL_EXEC: &str = "external_exec";
pub const SIGNAL_OBFUSCATION: &str = "obfuscation";
pub const SIGNAL_URLS: &str = "urls";

/// Points awarded per signal for one file category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightTable {
    /// Awarded once when macros or other active content are present
    pub active_content: u32,
    pub autoexec: u32,
    pub external_exec: u32,
    /// Points per distinct obfuscation signal
    pub obfuscation_each: u32,
    pub obfuscation_cap: u32,
    /// Points per distinct URL
    pub url_each: u32,
    pub url_cap: u32,
}

impl WeightTable {
    pub fn documents() -> Self {
        Self {
            active_content: 25,
            autoexec: 30,
            external_exec: 25,
            obfuscation_each: 5,
            obfuscation_cap: 20,
            url_each: 2,
            url_cap: 10,
        }
    }

    pub fn pdf() -> Self {
        Self {
            active_content: 10,
            autoexec: 30,
            external_exec: 25,
            obfuscation_each: 10,
            obfuscation_cap: 20,
            ..Self::documents()
        }
    }

    pub fn pe() -> Self {
        Self {
            active_content: 10,
            autoexec: 0,
            external_exec: 35,
            obfuscation_each: 25,
            obfuscation_cap: 25,
            ..Self::documents()
        }
    }

    pub fn zip() -> Self {
        Self {
            active_content: 10,
            autoexec: 0,
            external_exec: 35,
            obfuscation_each: 30,
            obfuscation_cap: 30,
            ..Self::documents()
        }
    }

    /// Only URLs count for files no tool understands.
    pub fn other() -> Self {
        Self {
            active_content: 0,
            autoexec: 0,
            external_exec: 0,
            obfuscation_each: 0,
            obfuscation_cap: 0,
            ..Self::documents()
        }
    }

    pub fn for_category(category: FileCategory) -> Self {
        match category {
            FileCategory::OfficeHwp => Self::documents(),
            FileCategory::Pdf => Self::pdf(),
            FileCategory::Pe => Self::pe(),
            FileCategory::Zip => Self::zip(),
            FileCategory::Other => Self::other(),
        }
    }
}

/// A weight table with only some fields set, as read from a config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WeightOverrides {
    pub active_content: Option<u32>,
    pub autoexec: Option<u32>,
    pub external_exec: Option<u32>,
    pub obfuscation_each: Option<u32>,
    pub obfuscation_cap: Option<u32>,
    pub url_each: Option<u32>,
    pub url_cap: Option<u32>,
}

impl CategoryOverride for WeightOverrides {
    type Target = WeightTable;

    fn merge_onto(self, base: WeightTable) -> WeightTable {
        WeightTable {
            active_content: self.active_content.unwrap_or(base.active_content),
            autoexec: self.autoexec.unwrap_or(base.autoexec),
            external_exec: self.external_exec.unwrap_or(base.external_exec),
            obfuscation_each: self.obfuscation_each.unwrap_or(base.obfuscation_each),
            obfuscation_cap: self.obfuscation_cap.unwrap_or(base.obfuscation_cap),
            url_each: self.url_each.unwrap_or(base.url_each),
            url_cap: self.url_cap.unwrap_or(base.url_cap),
        }
    }
}

/// Maps an indicator set to a bounded score.
pub trait RiskScorer {
    fn score(&self, category: FileCategory, indicators: &IndicatorSet) -> RiskScore;
}

/// Scoring engine backed by per-category weight tables.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    config: ScoringConfig,
}

impl ScoreEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn weights(&self, category: FileCategory) -> &WeightTable {
        self.config.for_category(category)
    }

    /// Score with an explicit table, independent of the configured ones.
    pub fn score_with(weights: &WeightTable, indicators: &IndicatorSet) -> RiskScore {
        let mut contributions = Vec::new();
        let mut push = |signal: &str, points: u32| {
            if points > 0 {
                contributions.push(ScoreContribution {
                    signal: signal.to_string(),
                    points,
                });
            }
        };

        if indicators.has_macros {
            push(SIGNAL_ACTIVE_CONTENT, weights.active_content);
        }
        if indicators.autoexec_detected {
            push(SIGNAL_AUTOEXEC, weights.autoexec);
        }
        if indicators.external_exec_detected {
            push(SIGNAL_EXTERNAL_EXEC, weights.external_exec);
        }
        push(
            SIGNAL_OBFUSCATION,
            capped(
                indicators.obfuscation_signals.len(),
                weights.obfuscation_each,
                weights.obfuscation_cap,
            ),
        );
        push(
            SIGNAL_URLS,
            capped(indicators.urls.len(), weights.url_each, weights.url_cap),
        );

        let sum: i64 = contributions.iter().map(|c| c.points as i64).sum();
        RiskScore::from_sum(sum, contributions)
    }
}

impl RiskScorer for ScoreEngine {
    fn score(&self, category: FileCategory, indicators: &IndicatorSet) -> RiskScore {
        Self::score_with(self.weights(category), indicators)
    }
}

fn capped(count: usize, each: u32, cap: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(each).min(cap)
}
