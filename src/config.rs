//! Configuration - defaults, `~/.shigure/config.yaml`, then environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BACKEND_HOST, DEFAULT_TIMEOUT_SECS,
    ENV_BACKEND_HOST, ENV_TOKEN_FILE, LOG_FILE_NAME, TOKEN_FILE_NAME,
};

/// Runtime configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the shigure backend, without trailing slash
    pub backend_host: String,
    pub token_file: PathBuf,
    pub log_file: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let dir = config_dir();
        Config {
            backend_host: String::from(DEFAULT_BACKEND_HOST),
            token_file: dir.join(TOKEN_FILE_NAME),
            log_file: dir.join(LOG_FILE_NAME),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `~/.shigure`, falling back to the working directory when there is no home
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

impl Config {
    /// Load from the default config file location and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(&config_dir().join(CONFIG_FILE_NAME))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config.normalized())
    }

    /// Parse a config file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config.normalized())
    }

    /// Apply environment-style overrides from the given lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_BACKEND_HOST).filter(|v| !v.trim().is_empty()) {
            self.backend_host = host;
        }
        if let Some(path) = lookup(ENV_TOKEN_FILE).filter(|v| !v.trim().is_empty()) {
            self.token_file = PathBuf::from(path);
        }
    }

    fn normalized(mut self) -> Self {
        self.backend_host = self.backend_host.trim().trim_end_matches('/').to_string();
        if self.request_timeout_secs == 0 {
            self.request_timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("backend_host: https://api.example.com/\n").unwrap();
        assert_eq!(config.backend_host, "https://api.example.com");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.token_file, Config::default().token_file);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        assert!(Config::from_yaml("backend_host: [unclosed").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::from_file(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "request_timeout_secs: 5\ntoken_file: /tmp/tk\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.token_file, PathBuf::from("/tmp/tk"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BACKEND_HOST, "http://10.0.0.2:6565"),
            (ENV_TOKEN_FILE, ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.backend_host, "http://10.0.0.2:6565");
        // Blank values are ignored
        assert_eq!(config.token_file, Config::default().token_file);
    }
}
