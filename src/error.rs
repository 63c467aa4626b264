//! Error types for the SafeScan analysis core.
//!
//! Errors stay internal to the pipeline: every failure reaching
//! [`crate::pipeline::Pipeline::assess`] is turned into a fallback
//! assessment before it gets to the caller.

use thiserror::Error;

/// Main error type for SafeScan operations.
#[derive(Debug, Error)]
pub enum SafescanError {
    /// The external generator did not answer within its deadline
    #[error("Generator timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// The enclosing request was cancelled while waiting on the generator
    #[error("Generator call cancelled")]
    Cancelled,

    /// The external generator returned an error
    #[error("Generator error: {0}")]
    Generator(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for SafeScan operations
pub type Result<T> = std::result::Result<T, SafescanError>;
