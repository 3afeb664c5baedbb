use crate::client::tracker::ConcurrencyPolicy;
use crate::render::OutputFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default recommendation endpoint (local development server).
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/recommend";

/// Top-level `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Full URL of the `/recommend` endpoint.
    pub endpoint: String,

    /// Request timeout in seconds. Unset means the HTTP client's defaults.
    pub timeout_secs: Option<u64>,

    /// Output layout: `text`, `html` or `json`.
    pub format: OutputFormat,

    /// Handling of overlapping requests: `latest-wins` or `unguarded`.
    pub policy: ConcurrencyPolicy,

    /// ANSI styling for text output when stdout is a terminal.
    pub color: bool,

    /// Prompt history for `interactive`. `~` is expanded.
    pub history_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            format: OutputFormat::default(),
            policy: ConcurrencyPolicy::default(),
            color: true,
            history_file: None,
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file
            .as_deref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).into_owned()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.endpoint.trim().is_empty(), "endpoint must not be empty");
        if let Some(secs) = self.timeout_secs {
            anyhow::ensure!(secs > 0, "timeout_secs must be greater than zero");
        }
        Ok(())
    }
}
