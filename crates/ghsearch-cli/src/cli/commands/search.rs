//! One-shot search command handler.
//!
//! Runs the query through the same `SearchSession` the widget logic uses, so
//! the output matches what the interactive table would show.

use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use ghsearch_core::client::GithubClient;
use ghsearch_core::config::Config;
use ghsearch_core::logging;
use ghsearch_core::search::{Applied, SearchSession};
use ghsearch_core::view::TableModel;

pub async fn run(query: &str, json: bool, config: &Config) -> Result<()> {
    logging::init_stderr_logging();

    let client = GithubClient::new(config).context("create GitHub client")?;
    let mut session = SearchSession::new(Arc::new(client), config.debounce());

    tracing::debug!(query, api_url = %config.api_url, "running one-shot search");
    session.input(query);
    if let Some(Applied::Failed(error)) = session.settle().await {
        return Err(error).with_context(|| format!("search for '{query}' failed"));
    }

    let state = session.state();
    if json {
        println!("{}", serde_json::to_string_pretty(state.results())?);
    } else {
        print_table(&state.table());
    }
    Ok(())
}

fn print_table(model: &TableModel<'_>) {
    if model.data_source.is_empty() {
        println!("No data");
        return;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(model.headers());
    for row in model.rows() {
        table.add_row(row);
    }
    println!("{table}");
}
