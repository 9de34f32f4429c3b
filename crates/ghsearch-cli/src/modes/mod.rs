//! Runtime execution modes.
//!
//! - `tui`: full-screen interactive search (optional feature)

#[cfg(feature = "tui")]
pub use ghsearch_tui::run_interactive_search;

#[cfg(not(feature = "tui"))]
pub async fn run_interactive_search(_config: &ghsearch_core::config::Config) -> anyhow::Result<()> {
    anyhow::bail!(
        "TUI support is disabled in this build (feature \"tui\").\n\
         Use `ghsearch search <QUERY>` instead."
    );
}
