//! Full-screen GitHub user search.

pub mod effects;
pub mod events;
pub mod input;
pub mod render;
pub mod results;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
use ghsearch_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive search widget until the user quits.
///
/// Must be called inside a multi-threaded tokio runtime: searches are spawned
/// as tasks while this call drives the terminal.
pub async fn run_interactive_search(config: &Config) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "Interactive search requires a terminal.\n\
             Use `ghsearch search <QUERY>` for non-interactive use."
        );
    }

    tracing::info!(api_url = %config.api_url, debounce_ms = config.debounce_ms, "starting search UI");

    let mut runtime = TuiRuntime::new(config)?;
    runtime.run()
}
