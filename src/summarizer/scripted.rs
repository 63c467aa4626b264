//! Summarizer returning a fixed outcome, for offline runs and tests.

use super::{SummaryRequest, Summarizer};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
enum Outcome {
    Reply(String),
    Fail(String),
}

/// Answers every request with the same reply or error.
#[derive(Debug)]
pub struct ScriptedSummarizer {
    outcome: Outcome,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_user_message: Mutex<Option<String>>,
}

impl ScriptedSummarizer {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            delay: None,
            calls: AtomicUsize::new(0),
            last_user_message: Mutex::new(None),
        }
    }

    pub fn reply(text: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Reply(text.into()))
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_outcome(Outcome::Fail(message.into()))
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self, request: &SummaryRequest) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_user_message.lock() {
            *last = Some(request.user_message.clone());
        }
    }

    pub fn last_user_message(&self) -> Option<String> {
        self.last_user_message
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl Summarizer for ScriptedSummarizer {
    fn summarize<'a>(
        &'a self,
        request: &'a SummaryRequest,
        _deadline: Instant,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>> {
        Box::pin(async move {
            self.record(request);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.outcome {
                Outcome::Reply(text) => Ok(text.clone()),
                Outcome::Fail(message) => Err(anyhow::anyhow!("{message}")),
            }
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
