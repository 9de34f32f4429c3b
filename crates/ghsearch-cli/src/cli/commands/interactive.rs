//! Interactive search command handler.

use anyhow::Result;
use ghsearch_core::config::{self, Config};
use ghsearch_core::logging;

use crate::modes;

pub async fn run(config: &Config) -> Result<()> {
    // Logs go to a file; the alternate screen owns stdout and stderr.
    let logs_dir = config::paths::logs_dir();
    let _guard = logging::init_file_logging(&logs_dir, &config.log_level)?;
    tracing::debug!(logs_dir = %logs_dir.display(), "file logging enabled");

    modes::run_interactive_search(config).await
}
