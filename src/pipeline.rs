//! End-to-end assessment: extract, score, summarize, normalize.

use crate::config::SafescanConfig;
use crate::core::{RawAnalysisResult, ScoredPayload};
use crate::indicators::IndicatorExtractor;
use crate::scoring::{RiskScorer, ScoreEngine};
use crate::summarizer::{Summarizer, SummarizerGateway, SummaryRequest};
use crate::timeout::CancelToken;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{info, Instrument};
use uuid::Uuid;

/// Stateless pipeline; one instance can serve any number of files.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: SafescanConfig,
    extractor: IndicatorExtractor,
    scorer: ScoreEngine,
    gateway: SummarizerGateway,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(SafescanConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: SafescanConfig) -> Self {
        Self {
            extractor: IndicatorExtractor::new(&config),
            scorer: ScoreEngine::new(config.scoring.clone()),
            gateway: SummarizerGateway::new(config.summarizer.clone()),
            config,
        }
    }

    pub fn config(&self) -> &SafescanConfig {
        &self.config
    }

    /// Extract indicators and compute the deterministic score.
    pub fn prepare(&self, raw: &RawAnalysisResult) -> ScoredPayload {
        let indicators = self.extractor.extract(raw);
        let risk = self.scorer.score(raw.category, &indicators);
        ScoredPayload {
            file: raw.file_name.clone(),
            category: raw.category,
            indicators,
            risk,
            summary_hint: self
                .config
                .prompts
                .for_category(raw.category)
                .summary_hint
                .clone(),
        }
    }

    /// [`Pipeline::prepare`] for many files in parallel, in input order.
    pub fn prepare_batch(&self, raws: &[RawAnalysisResult]) -> Vec<ScoredPayload> {
        raws.par_iter().map(|raw| self.prepare(raw)).collect()
    }

    pub fn request(&self, payload: ScoredPayload) -> SummaryRequest {
        SummaryRequest::new(payload, &self.config.prompts)
    }

    /// Full assessment of one file; always returns a valid assessment JSON
    /// object string.
    pub async fn assess(
        &self,
        raw: &RawAnalysisResult,
        summarizer: &dyn Summarizer,
        cancel: &CancelToken,
    ) -> String {
        let analysis_id = Uuid::new_v4();
        let span = crate::span_trace!(
            "assess",
            analysis_id = %analysis_id,
            file = %raw.file_name,
            category = %raw.category
        );

        async {
            let payload = self.prepare(raw);
            info!(
                score = payload.risk.score,
                level = %payload.risk.level,
                "Deterministic score computed"
            );
            let request = self.request(payload);
            self.gateway.run(summarizer, &request, cancel).await
        }
        .instrument(span)
        .await
    }

    /// Assess a JSON document from the tool-invocation layer.
    pub async fn assess_value(
        &self,
        value: &Value,
        summarizer: &dyn Summarizer,
        cancel: &CancelToken,
    ) -> String {
        let raw = RawAnalysisResult::from_value(value);
        self.assess(&raw, summarizer, cancel).await
    }
}
