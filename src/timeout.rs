//! Timeout and cancellation utilities for the external generator call.
//!
//! The generator is the only blocking step of the pipeline. Every call is
//! bounded by a [`TimeoutConfig`] and tied to the caller's request through
//! a [`CancelToken`].

use crate::error::{Result, SafescanError};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{timeout, Instant};
use tracing::{debug, error, warn};

/// Default generator timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;

/// Upper bound on any configured timeout (one day)
pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;

/// Timeout configuration for one bounded operation
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Maximum duration for the operation
    pub duration: Duration,
    /// Whether to log timeout errors
    pub log_warnings: bool,
    /// Operation name for logging
    pub operation_name: String,
}

impl TimeoutConfig {
    /// Create a new timeout configuration, clamped to [`MAX_TIMEOUT_SECONDS`]
    pub fn new(seconds: u64, operation: impl Into<String>) -> Self {
        Self::from_duration(Duration::from_secs(seconds.min(MAX_TIMEOUT_SECONDS)), operation)
    }

    /// Create a timeout configuration with sub-second precision
    pub fn from_duration(duration: Duration, operation: impl Into<String>) -> Self {
        Self {
            duration,
            log_warnings: true,
            operation_name: operation.into(),
        }
    }

    /// Instant at which this operation is due, saturating far in the future.
    pub fn deadline(&self) -> Instant {
        let now = Instant::now();
        now.checked_add(self.duration)
            .unwrap_or_else(|| now + Duration::from_secs(MAX_TIMEOUT_SECONDS))
    }
}

/// Execute an async operation with a timeout
pub async fn with_timeout<T, F>(config: TimeoutConfig, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    debug!(
        "Starting operation '{}' with timeout of {:?}",
        config.operation_name, config.duration
    );

    match timeout(config.duration, future).await {
        Ok(result) => {
            debug!("Operation '{}' finished", config.operation_name);
            result
        }
        Err(_) => {
            if config.log_warnings {
                error!(
                    "Operation '{}' timed out after {:?}",
                    config.operation_name, config.duration
                );
            }

            Err(SafescanError::Timeout {
                seconds: config.duration.as_secs(),
            })
        }
    }
}

/// Owner side of a cancellation signal, held by the request handler.
#[derive(Debug)]
pub struct CancelSource {
    tx: watch::Sender<bool>,
}

/// Observer side of a cancellation signal, handed to the pipeline.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

/// Create a linked cancellation source and token.
pub fn cancel_pair() -> (CancelSource, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelSource { tx }, CancelToken { rx })
}

impl CancelSource {
    /// Signal cancellation to every token derived from this source.
    pub fn cancel(&self) {
        // send only fails once every receiver is gone, which is fine here
        let _ = self.tx.send(true);
    }

    /// Derive another token observing this source.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether cancellation has already been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested.
    ///
    /// If the source is dropped without cancelling, this never resolves.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Execute an async operation bounded by both a timeout and a cancel token.
pub async fn with_deadline<T, F>(config: TimeoutConfig, cancel: &CancelToken, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    if cancel.is_cancelled() {
        return Err(SafescanError::Cancelled);
    }

    let operation = config.operation_name.clone();
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            warn!("Operation '{}' cancelled by caller", operation);
            Err(SafescanError::Cancelled)
        }
        result = with_timeout(config, future) => result,
    }
}
