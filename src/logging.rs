//! Tracing setup and logging macros.
//!
//! The host service installs the subscriber once from [`LoggingConfig`];
//! the library itself only emits events and spans.

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

const FALLBACK_FILTER: &str = "info";

/// Output encoding of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for terminals
    #[default]
    Pretty,
    /// One JSON object per line for log shippers
    Json,
}

/// Subscriber settings read from the `logging` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directives used when `RUST_LOG` is unset (default: "info")
    pub filter: String,
    /// Emit an event when each span closes
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: FALLBACK_FILTER.to_string(),
            span_events: true,
        }
    }
}

impl LoggingConfig {
    /// `RUST_LOG` wins over the configured directives; unparsable
    /// directives fall back to `info`.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))
            .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let spans = if self.span_events {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let layer = fmt::layer()
            .with_span_events(spans)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        match self.format {
            LogFormat::Pretty => layer.boxed(),
            LogFormat::Json => layer.json().with_current_span(true).boxed(),
        }
    }
}

static INSTALLED: OnceCell<LogFormat> = OnceCell::new();

/// Install the global subscriber and return the format in effect.
///
/// Only the first call configures anything; later calls report the
/// format chosen then. A subscriber already owned by the host is left alone.
pub fn init_tracing(config: &LoggingConfig) -> LogFormat {
    *INSTALLED.get_or_init(|| {
        let installed = tracing_subscriber::registry()
            .with(config.fmt_layer())
            .with(config.env_filter())
            .try_init()
            .is_ok();
        info!(format = ?config.format, installed, "SafeScan tracing initialized");
        config.format
    })
}

/// Span around one analysis step
#[macro_export]
macro_rules! span_trace {
    ($name:expr) => {
        tracing::info_span!($name)
    };
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}

/// Log an error at the point it is swallowed and hand it back
#[macro_export]
macro_rules! log_error {
    ($err:expr, $step:expr) => {{
        let e = $err;
        tracing::error!(error = %e, step = $step, "Analysis step failed");
        e
    }};
}
