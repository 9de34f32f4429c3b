//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use ghsearch_core::config;

mod commands;

#[derive(Parser)]
#[command(name = "ghsearch")]
#[command(version)]
#[command(about = "Search GitHub users as you type")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the GitHub API base URL from config
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Override the quiet period (milliseconds) before a search is sent
    #[arg(long, global = true, value_name = "MS", env = "GHSEARCH_DEBOUNCE_MS")]
    debounce_ms: Option<u64>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run a single search and print the matching users
    Search {
        /// User name (or part of one) to search for
        query: String,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write a commented default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        api_url,
        debounce_ms,
    } = cli;

    let load_config = || -> Result<config::Config> {
        let mut config = config::Config::load().context("load config")?;
        if let Some(url) = api_url {
            config.api_url = url;
        }
        if let Some(ms) = debounce_ms {
            config.debounce_ms = ms;
        }
        Ok(config)
    };

    match command {
        // default to the interactive widget
        None => commands::interactive::run(&load_config()?).await,
        Some(Commands::Search { query, json }) => {
            commands::search::run(&query, json, &load_config()?).await
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
