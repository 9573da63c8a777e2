//! Logging setup.
//!
//! While the TUI runs the terminal belongs to ratatui, so all tracing output
//! goes to daily-rolling files in the configured log directory through a
//! non-blocking writer. The returned guard must stay alive for the duration
//! of the program or buffered log lines are lost.

use crate::config::UiConfig;
use crate::types::{AppError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Log file prefix inside the log directory.
const LOG_FILE_PREFIX: &str = "askdocs";

/// Initialise the global tracing subscriber writing to rolling log files.
pub fn init(config: &UiConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| AppError::Config(format!("invalid log_level: {}", e)))?;

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}
