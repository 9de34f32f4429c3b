//! Configuration management for ghsearch.
//!
//! Loads configuration from ${GHSEARCH_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api_url` (used by tests to point at a mock server).
pub const API_URL_ENV: &str = "GHSEARCH_API_URL";

pub mod paths {
    //! Path resolution for ghsearch configuration and log directories.
    //!
    //! GHSEARCH_HOME resolution order:
    //! 1. GHSEARCH_HOME environment variable (if set)
    //! 2. ~/.config/ghsearch (default)

    use std::path::PathBuf;

    /// Returns the ghsearch home directory.
    pub fn ghsearch_home() -> PathBuf {
        if let Ok(home) = std::env::var("GHSEARCH_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("ghsearch")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        ghsearch_home().join("config.toml")
    }

    /// Returns the directory holding log files.
    pub fn logs_dir() -> PathBuf {
        ghsearch_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the GitHub REST API
    pub api_url: String,

    /// Quiet period before a typed query is sent, in milliseconds
    pub debounce_ms: u64,

    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request (GitHub rejects requests without one)
    pub user_agent: String,

    /// Log filter directive used when GHSEARCH_LOG is not set
    pub log_level: String,
}

impl Config {
    pub const DEFAULT_API_URL: &str = "https://api.github.com";
    const DEFAULT_DEBOUNCE_MS: u64 = 300;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_USER_AGENT: &str = "ghsearch";
    const DEFAULT_LOG_LEVEL: &str = "info";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Applies environment overrides on top of file values.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            self.api_url = url.trim().to_string();
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: Self::DEFAULT_API_URL.to_string(),
            debounce_ms: Self::DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: Self::DEFAULT_USER_AGENT.to_string(),
            log_level: Self::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Commented template written by `ghsearch config init`.
pub fn default_config_template() -> &'static str {
    r#"# ghsearch configuration

# Base URL of the GitHub REST API.
api_url = "https://api.github.com"

# Quiet period (milliseconds) before a typed query is sent.
debounce_ms = 300

# Request timeout in seconds (0 disables).
request_timeout_secs = 10

# User-Agent header sent with every request.
user_agent = "ghsearch"

# Log filter for the log file (GHSEARCH_LOG takes precedence).
# log_level = "info"
"#
}
