//! Risk levels, scores and the assessment object returned to callers.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Upper bound of every risk score.
pub const MAX_SCORE: u32 = 100;

/// Maximum number of reasons carried by a bounded assessment.
pub const MAX_REASONS: usize = 3;

/// Coarse risk bucket derived from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `<40` low, `40..=69` medium, `>=70` high.
    pub fn from_score(score: u32) -> Self {
        if score < 40 {
            RiskLevel::Low
        } else if score < 70 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One non-zero additive term of a score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub signal: String,
    pub points: u32,
}

/// Deterministic score with its level and per-signal breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub score: u32,
    pub level: RiskLevel,
    pub contributions: Vec<ScoreContribution>,
}

impl RiskScore {
    /// Clamp a raw additive sum into the score range and derive the level.
    pub fn from_sum(sum: i64, contributions: Vec<ScoreContribution>) -> Self {
        let score = sum.clamp(0, MAX_SCORE as i64) as u32;
        Self {
            score,
            level: RiskLevel::from_score(score),
            contributions,
        }
    }
}

/// Structured risk assessment in the caller-facing wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub summary: String,
    #[serde(rename = "risk_score")]
    pub score: u32,
    #[serde(rename = "risk_level")]
    pub level: RiskLevel,
    pub reasons: Vec<String>,
    pub recommended_actions: Vec<String>,
}

impl RiskAssessment {
    /// Zero-score assessment; the level follows from the score.
    pub fn low(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            score: 0,
            level: RiskLevel::Low,
            reasons: Vec::new(),
            recommended_actions: Vec::new(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.recommended_actions.push(action.into());
        self
    }

    /// Serialize to a single-line JSON object string.
    pub fn to_json(&self) -> String {
        json!({
            "summary": self.summary,
            "risk_score": self.score,
            "risk_level": self.level.as_str(),
            "reasons": self.reasons,
            "recommended_actions": self.recommended_actions,
        })
        .to_string()
    }

    /// Read a normalized response into a bounded assessment.
    ///
    /// The score is clamped into `[0, 100]`, the level is recomputed from it
    /// and reasons are cut to three. Returns `None` unless `text` is a JSON
    /// object.
    pub fn bounded_from_json(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        let obj = value.as_object()?;

        let score = obj.get("risk_score").map(score_from_value).unwrap_or(0);
        let strings = |key: &str| -> Vec<String> {
            obj.get(key)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .map(|v| match v {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default()
        };

        let mut reasons = strings("reasons");
        reasons.truncate(MAX_REASONS);

        Some(Self {
            summary: obj
                .get("summary")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            score,
            level: RiskLevel::from_score(score),
            reasons,
            recommended_actions: strings("recommended_actions"),
        })
    }
}

fn score_from_value(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|f| f.is_finite())
        .map(|f| f.round().clamp(0.0, MAX_SCORE as f64) as u32)
        .unwrap_or(0)
}
