//! Configuration file.
//!
//! The file is only ever read. It never holds the API key; pass that with
//! `--api-key` or `OTI_API_KEY`.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "OTI_CONFIG";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API base URL.
    pub base_url: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Seconds between bulk poll rounds.
    pub poll_interval: Option<u64>,

    /// Maximum bulk poll rounds.
    pub retries: Option<u32>,

    /// Default directory for bulk runs and downloads.
    pub output_dir: Option<String>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("cloud", "oti", "otictl")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location; a missing file means defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        Ok(config)
    }

    /// Output directory with `~` and environment variables expanded.
    pub fn output_dir(&self, flag: Option<&str>) -> Result<PathBuf> {
        let raw = flag.or(self.output_dir.as_deref()).unwrap_or(".");
        let expanded = shellexpand::full(raw)
            .with_context(|| format!("cannot expand output directory {raw}"))?;
        Ok(PathBuf::from(expanded.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.base_url.is_none());
        assert!(config.retries.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"https://oti.example.test/api\"\n\
             output_format = \"json\"\n\
             poll_interval = 30\n\
             retries = 4\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://oti.example.test/api"));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
        assert_eq!(config.poll_interval, Some(30));
        assert_eq!(config.retries, Some(4));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "retries = \"many\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_output_dir_precedence() {
        let config = Config {
            output_dir: Some("/var/lib/oti".to_string()),
            ..Config::default()
        };
        assert_eq!(config.output_dir(Some("/tmp/x")).unwrap(), PathBuf::from("/tmp/x"));
        assert_eq!(config.output_dir(None).unwrap(), PathBuf::from("/var/lib/oti"));
        assert_eq!(Config::default().output_dir(None).unwrap(), PathBuf::from("."));
    }
}
