//! Structured logging infrastructure for the MixHaven bot.

use crate::types::{MixHavenError, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,
    /// Multi-line output with colors, for development.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LoggingSetup {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info").
    pub level: String,
    /// Console output format.
    pub format: LogFormat,
    /// Optional file path; logs roll daily next to it.
    pub file_path: Option<String>,
}

impl Default for LoggingSetup {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file_path: None,
        }
    }
}

/// Initializes the global tracing subscriber.
///
/// Returns the file writer guard when file output is enabled; it must be kept
/// alive for the lifetime of the process or buffered lines are lost.
pub fn init_logging(setup: &LoggingSetup) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&setup.level))
        .map_err(|e| MixHavenError::Logging(e.to_string()))?;

    let console = match setup.format {
        LogFormat::Compact => fmt::layer().compact().boxed(),
        LogFormat::Pretty => fmt::layer().pretty().boxed(),
        LogFormat::Json => fmt::layer().json().boxed(),
    };

    let (file_layer, guard) = match &setup.file_path {
        Some(path) => {
            let path = Path::new(path);
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| MixHavenError::Logging(format!("invalid log file path: {}", path.display())))?;

            let appender = tracing_appender::rolling::daily(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| MixHavenError::Logging(e.to_string()))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_setup() {
        let setup = LoggingSetup::default();
        assert_eq!(setup.level, "info");
        assert_eq!(setup.format, LogFormat::Compact);
        assert!(setup.file_path.is_none());
    }
}
