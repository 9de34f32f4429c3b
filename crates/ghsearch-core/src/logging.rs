//! Tracing subscriber setup.
//!
//! The interactive widget owns the terminal, so it logs to a file under
//! `${GHSEARCH_HOME}/logs`. One-shot commands log to stderr.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive (e.g. `ghsearch_core=debug`).
pub const LOG_ENV: &str = "GHSEARCH_LOG";

/// Log file name inside the logs directory.
pub const LOG_FILE: &str = "ghsearch.log";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a subscriber that appends to `<dir>/ghsearch.log`.
///
/// The returned guard flushes the background writer on drop; keep it alive
/// for as long as the TUI runs.
pub fn init_file_logging(dir: &Path, default_level: &str) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(guard)
}

/// Installs a subscriber writing to stderr.
///
/// Defaults to `error`: commands report their own failures, so fetch warnings
/// stay quiet unless `GHSEARCH_LOG` asks for them.
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("error"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
