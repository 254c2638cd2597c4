//! Process-wide logging setup shared by the hopgate binaries.
//!
//! [`init`] installs a `tracing` subscriber filtered by `RUST_LOG` (defaulting
//! to [`DEFAULT_FILTER`]) and forwards `log` records into it, so dependencies
//! that still log through the `log` facade end up in the same output.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),
    #[error("a global subscriber is already installed: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
    #[error("log bridge already installed: {0}")]
    LogBridge(#[from] tracing_log::log::SetLoggerError),
    #[error("unknown log format: {0}")]
    UnknownFormat(String),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Output shape of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human readable output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(TelemetryError::UnknownFormat(s.to_string())),
        }
    }
}

/// Builds the filter from explicit directives, or [`DEFAULT_FILTER`].
pub fn build_filter(directives: Option<&str>) -> Result<EnvFilter> {
    match directives {
        Some(directives) if !directives.trim().is_empty() => Ok(EnvFilter::try_new(directives)?),
        _ => Ok(EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Installs the global subscriber. Call once, early in `main`.
///
/// Fails if `RUST_LOG` holds invalid directives or if a subscriber or `log`
/// logger was already installed.
pub fn init(format: LogFormat) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(directives.as_deref())?;

    let fmt_layer = match format {
        LogFormat::Pretty => tracing_subscriber::fmt::layer().pretty().boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(fmt_layer).with(filter);
    tracing::subscriber::set_global_default(subscriber)?;
    tracing_log::LogTracer::init()?;

    tracing::debug!(%format, "telemetry initialized");
    Ok(())
}
