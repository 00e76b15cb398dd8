//! Logging initialization: human-readable logs on stderr so stdout carries only results.
//!
//! - **RUST_LOG**: level filter, e.g. `info`, `oneir=debug`. Default: `info`.
//! - **ONEIR_LOG_DIR**: when set, logs are also written to a daily-rolling file
//!   `oneirvision.log.<date>` in that directory (plain text, no ANSI).

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_FILTER: &str = "info,hyper_util=off";
const LOG_FILE_PREFIX: &str = "oneirvision.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. Keep the returned guard alive until exit so buffered
/// file logs are flushed.
pub fn init() -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter());

    match std::env::var("ONEIR_LOG_DIR").ok().filter(|d| !d.trim().is_empty()) {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .try_init()?;
            tracing::debug!(dir = %dir, "logging to file");
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(stderr_layer).try_init()?;
            Ok(None)
        }
    }
}
