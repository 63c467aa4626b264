//! Boundary to the external summarization service.
//!
//! The service itself is a collaborator: hosts implement [`Summarizer`] over
//! whatever client they use. This module builds the request, bounds the
//! call with a timeout and the caller's cancel token, and maps every failure
//! to a fallback assessment.

pub mod scripted;

use crate::config::{PromptConfig, SummarizerConfig};
use crate::core::ScoredPayload;
use crate::error::SafescanError;
use crate::log_error;
use crate::response::{normalize_response, FallbackGenerator};
use crate::timeout::{with_deadline, CancelToken, TimeoutConfig};
use std::future::Future;
use std::pin::Pin;
use tokio::time::Instant;
use tracing::{debug, warn};

pub use scripted::ScriptedSummarizer;

/// Everything the generator needs for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    pub payload: ScoredPayload,
    pub system_instruction: String,
    pub user_message: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl SummaryRequest {
    /// Build a request using the prompt parameters of the payload's category.
    pub fn new(payload: ScoredPayload, prompts: &PromptConfig) -> Self {
        let prompt = prompts.for_category(payload.category);
        Self {
            user_message: payload.to_user_message(),
            system_instruction: prompt.system_instruction.clone(),
            temperature: prompt.temperature,
            max_output_tokens: prompt.max_output_tokens,
            payload,
        }
    }
}

/// Text generation capability returning the raw reply.
pub trait Summarizer: Send + Sync {
    /// Produce a reply for `request`. Implementations should give up by
    /// `deadline`; the caller enforces it regardless.
    fn summarize<'a>(
        &'a self,
        request: &'a SummaryRequest,
        deadline: Instant,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;

    fn name(&self) -> &str {
        "summarizer"
    }
}

/// Runs a summarizer under the configured limits; never fails.
#[derive(Debug, Clone)]
pub struct SummarizerGateway {
    config: SummarizerConfig,
    fallback: FallbackGenerator,
}

impl Default for SummarizerGateway {
    fn default() -> Self {
        Self::new(SummarizerConfig::default())
    }
}

impl SummarizerGateway {
    pub fn new(config: SummarizerConfig) -> Self {
        let fallback = FallbackGenerator::new(&config);
        Self { config, fallback }
    }

    pub fn fallback(&self) -> &FallbackGenerator {
        &self.fallback
    }

    /// Call the summarizer and return normalized assessment JSON.
    pub async fn run(
        &self,
        summarizer: &dyn Summarizer,
        request: &SummaryRequest,
        cancel: &CancelToken,
    ) -> String {
        let limits = TimeoutConfig::new(self.config.timeout_seconds, summarizer.name());
        let deadline = limits.deadline();

        let call = async {
            summarizer
                .summarize(request, deadline)
                .await
                .map_err(|e| SafescanError::Generator(format!("{e:#}")))
        };

        match with_deadline(limits, cancel, call).await {
            Ok(reply) => {
                debug!(chars = reply.len(), "Generator replied");
                normalize_response(&reply)
            }
            Err(SafescanError::Generator(message)) => {
                warn!(error = %message, "Generator call failed");
                self.fallback.for_error(&message)
            }
            Err(other) => {
                let err = log_error!(other, "generator call");
                self.fallback.error(&err.to_string())
            }
        }
    }
}
