//! Logging utilities for the Master Office service.
//!
//! One place to set up the tracing subscriber for every crate. Targets of all
//! `masteroffice_*` crates share the `masteroffice` prefix, so a single filter
//! directive controls them.

use masteroffice_config::models::LoggingConfig;
use tracing::{info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix used by the daily rolling log file.
pub const LOG_FILE_PREFIX: &str = "masteroffice.log";

/// Initialize logging from the `[logging]` section of the app config.
///
/// When `directory` is set, a daily rolling file is written next to the
/// console output. The returned guard flushes that file on drop and must be
/// held for the lifetime of the process. Later calls leave the installed
/// subscriber in place.
///
/// # Examples
///
/// ```
/// use masteroffice_common::logging;
/// use masteroffice_config::LoggingConfig;
///
/// let _guard = logging::init_with_config(&LoggingConfig::default());
/// ```
pub fn init_with_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = parse_level(&config.level);

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(console_layer())
        .with(file_layer)
        .with(filter_for(level))
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized at level: {} (file output: {})",
            level,
            config.directory.as_deref().unwrap_or("off")
        );
    }
    guard
}

/// Parses a configured level name, falling back to INFO.
pub fn parse_level(value: &str) -> Level {
    match value.trim().parse::<Level>() {
        Ok(level) => level,
        Err(_) => {
            warn!("Unknown log level '{}', using info", value);
            Level::INFO
        }
    }
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_thread_names(true)
}

fn filter_for(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("masteroffice={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}
