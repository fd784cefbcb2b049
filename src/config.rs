//! Configuration module for tarihte

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{gemini, history, wikipedia};
use crate::paths;

/// Placeholder shipped in sample configs; treated as "no key"
pub const API_KEY_PLACEHOLDER: &str = "YAPI_ANAHTARINIZI_BURAYA_GIRIN";

/// Environment variable that overrides the configured Gemini key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key (overridden by `GEMINI_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Gemini REST base URL
    #[serde(default = "default_gemini_api_url")]
    pub gemini_api_url: String,

    /// History API base URL; `/{month}/{day}` is appended
    #[serde(default = "default_history_base_url")]
    pub history_base_url: String,

    /// Wikipedia action API endpoint
    #[serde(default = "default_wikipedia_api_url")]
    pub wikipedia_api_url: String,

    /// Requested thumbnail width in pixels
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,

    /// User-Agent sent to Wikipedia
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of search candidates to validate
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Days tried before giving up on a random event
    #[serde(default = "default_random_attempts")]
    pub random_attempts: usize,

    /// Outbound request timeout in seconds (0 = none)
    #[serde(default)]
    pub request_timeout_secs: u64,

    /// Column width for wrapped text output
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_gemini_model() -> String {
    gemini::DEFAULT_MODEL.to_string()
}

fn default_gemini_api_url() -> String {
    gemini::DEFAULT_API_URL.to_string()
}

fn default_history_base_url() -> String {
    history::DEFAULT_BASE_URL.to_string()
}

fn default_wikipedia_api_url() -> String {
    wikipedia::DEFAULT_API_URL.to_string()
}

fn default_thumbnail_size() -> u32 {
    500
}

fn default_user_agent() -> String {
    format!("tarihte/{} (on-this-day terminal client)", crate::VERSION)
}

fn default_search_limit() -> usize {
    8
}

fn default_random_attempts() -> usize {
    5
}

fn default_wrap_width() -> usize {
    80
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: default_gemini_model(),
            gemini_api_url: default_gemini_api_url(),
            history_base_url: default_history_base_url(),
            wikipedia_api_url: default_wikipedia_api_url(),
            thumbnail_size: default_thumbnail_size(),
            user_agent: default_user_agent(),
            search_limit: default_search_limit(),
            random_attempts: default_random_attempts(),
            request_timeout_secs: 0,
            wrap_width: default_wrap_width(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path or create default,
    /// then apply the `GEMINI_API_KEY` override
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        let mut config = Self::load_from(&path)?;
        config.gemini_api_key =
            resolve_api_key(config.gemini_api_key.take(), std::env::var(API_KEY_ENV).ok());
        Ok(config)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// The usable API key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key.as_deref().filter(|k| is_usable_key(k))
    }

    /// Request timeout, `None` when disabled
    pub const fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.request_timeout_secs))
        }
    }
}

/// Pick the effective key: a usable environment value wins over the file
pub fn resolve_api_key(file_key: Option<String>, env_key: Option<String>) -> Option<String> {
    env_key
        .filter(|k| is_usable_key(k))
        .or_else(|| file_key.filter(|k| is_usable_key(k)))
        .map(|k| k.trim().to_string())
}

fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != API_KEY_PLACEHOLDER
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.thumbnail_size, 500);
        assert_eq!(config.gemini_model, gemini::DEFAULT_MODEL);
        assert_eq!(config.wikipedia_api_url, wikipedia::DEFAULT_API_URL);
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "gemini_model = \"gemini-2.0-flash\"\nrequest_timeout_secs = 10\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.history_base_url, "https://history.muffinlabs.com/date");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            gemini_api_key: Some("abc".to_string()),
            search_limit: 3,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "search_limit = \"many\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_placeholder_key_is_unusable() {
        let config = Config {
            gemini_api_key: Some(API_KEY_PLACEHOLDER.to_string()),
            ..Config::default()
        };
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_resolve_api_key_precedence() {
        assert_eq!(
            resolve_api_key(Some("file".into()), Some("env".into())),
            Some("env".to_string())
        );
        assert_eq!(
            resolve_api_key(Some("file".into()), Some("  ".into())),
            Some("file".to_string())
        );
        assert_eq!(resolve_api_key(Some(API_KEY_PLACEHOLDER.into()), None), None);
        assert_eq!(resolve_api_key(None, None), None);
    }
}
