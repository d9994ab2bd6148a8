//! File-based logging.
//!
//! The TUI owns the terminal, so tracing output goes to a daily rolling file
//! instead of stdout/stderr.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "watchlist_tui";
const DEFAULT_FILTER: &str = "watchlist_tui=debug,warn";

/// Initialises the global subscriber.
///
/// Filter precedence: `RUST_LOG`, then `configured_filter`, then
/// `watchlist_tui=debug,warn`. The returned guard flushes buffered lines when
/// dropped, so keep it alive until the terminal is restored.
pub fn init_logging(log_dir: &Path, configured_filter: Option<&str>) -> anyhow::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured_filter.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "Logging initialized");

    Ok(guard)
}
