//! Structured logging for indexlab
//! JSON logging for benchmark harnesses, pretty output for development

use anyhow::Result;
use std::io;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    EnvFilter, Registry,
};

/// Logging configuration
#[derive(Clone, Debug)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON format (default: true for benchmark runs)
    pub json_format: bool,

    /// Enable span events for build/train phases
    pub log_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            log_spans: true,
        }
    }
}

impl LogConfig {
    /// JSON output at INFO, suitable for driving from a benchmark harness
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            json_format: true,
            log_spans: true,
        }
    }

    /// Pretty output at DEBUG for local development
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            log_spans: true,
        }
    }
}

/// Initialize structured logging with the given configuration
pub fn init_logging(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level).or_else(|_| EnvFilter::try_new("info"))?;

    let span_events = if config.log_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    if config.json_format {
        let fmt_layer = fmt::layer()
            .json()
            .with_span_events(span_events)
            .with_current_span(true)
            .with_target(true)
            .with_writer(io::stdout);

        let subscriber = Registry::default().with(filter).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let fmt_layer = fmt::layer()
            .pretty()
            .with_span_events(span_events)
            .with_target(true)
            .with_thread_ids(false)
            .with_writer(io::stdout);

        let subscriber = Registry::default().with(filter).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    }

    Ok(())
}

/// Initialize logging from environment variables
/// RUST_LOG - log level (trace, debug, info, warn, error)
/// INDEXLAB_LOG_FORMAT - json or pretty (default: json)
pub fn init_from_env() -> Result<()> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let json_format = std::env::var("INDEXLAB_LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(true);

    let config = LogConfig {
        level,
        json_format,
        log_spans: true,
    };

    init_logging(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert!(config.json_format);
    }

    #[test]
    fn test_development_config() {
        let config = LogConfig::development();
        assert_eq!(config.level, "debug");
        assert!(!config.json_format);
    }

    #[test]
    fn test_logging_initialization() {
        let config = LogConfig {
            level: "debug".to_string(),
            json_format: false,
            log_spans: false,
        };

        // May fail if another test installed a subscriber first; the API
        // call itself is what's under test.
        let _ = init_logging(config);
    }
}
