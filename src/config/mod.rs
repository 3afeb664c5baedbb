//! Configuration loading.
//!
//! Precedence, lowest first: built-in defaults, `config.toml`, environment
//! (`CROP_ADVISOR_ENDPOINT`), command-line flags. Unknown keys in the file
//! are reported with a warning instead of failing the load.

pub mod schema;

pub use schema::{Config, DEFAULT_ENDPOINT};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable overriding `endpoint`.
pub const ENDPOINT_ENV: &str = "CROP_ADVISOR_ENDPOINT";

const CONFIG_FILE: &str = "config.toml";

/// Platform config location, e.g. `~/.config/crop-advisor/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "crop-advisor").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Expand `~` in a user-supplied path.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

impl Config {
    /// Load from `path`, or from [`default_path`] when `None`.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::load_file(path)?,
            None => match default_path() {
                Some(path) if path.exists() => Self::load_file(&path)?,
                _ => {
                    tracing::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let (config, ignored) = Self::parse(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        for key in ignored {
            tracing::warn!("Unknown config key '{key}' in {}", path.display());
        }
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse TOML, returning the config and the paths of any unknown keys.
    pub fn parse(raw: &str) -> Result<(Self, Vec<String>)> {
        let table: toml::Table = raw.parse()?;
        let mut ignored = Vec::new();
        let config = serde_ignored::deserialize(toml::Value::Table(table), |path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Apply environment-style overrides through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!("Endpoint overridden by {ENDPOINT_ENV}");
            self.endpoint = endpoint;
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(Config);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tracker::ConcurrencyPolicy;
    use crate::render::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn empty_file_gives_defaults() {
        let (config, ignored) = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.timeout().is_none());
        assert!(ignored.is_empty());
    }

    #[test]
    fn parses_all_fields() {
        let raw = r#"
            endpoint = "http://farm.local:9000/recommend"
            timeout_secs = 15
            format = "html"
            policy = "unguarded"
            color = false
        "#;
        let (config, _) = Config::parse(raw).unwrap();
        assert_eq!(config.endpoint, "http://farm.local:9000/recommend");
        assert_eq!(config.timeout_secs, Some(15));
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.policy, ConcurrencyPolicy::Unguarded);
        assert!(!config.color);
    }

    #[test]
    fn reports_unknown_keys() {
        let (_, ignored) = Config::parse("endpont = \"typo\"\n").unwrap();
        assert_eq!(ignored, vec!["endpont".to_string()]);
    }

    #[test]
    fn rejects_bad_policy() {
        assert!(Config::parse("policy = \"first-wins\"").is_err());
    }

    #[test]
    fn env_override_replaces_file_endpoint() {
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == ENDPOINT_ENV).then(|| "http://10.0.0.2:8000/recommend".to_string())
        });
        assert_eq!(config.endpoint, "http://10.0.0.2:8000/recommend");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some("  ".to_string()));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn load_reads_explicit_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = 5\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.timeout_secs, Some(5));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config = Config {
            timeout_secs: Some(0),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_round_trips_defaults() {
        let rendered = Config::default().to_toml().unwrap();
        let (parsed, ignored) = Config::parse(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(ignored.is_empty());
    }

    #[test]
    fn schema_lists_endpoint() {
        let schema = Config::json_schema().unwrap();
        assert!(schema.contains("\"endpoint\""));
    }

    #[test]
    fn history_path_expands_tilde() {
        let config = Config {
            history_file: Some("~/crop-history".into()),
            ..Config::default()
        };
        let path = config.history_path().unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
    }
}
