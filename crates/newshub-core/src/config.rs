//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/newshub/config.toml)
//! 3. Environment variables (NEWSHUB_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::storage::{BOOKMARKS_KEY, SESSION_KEY};

/// Environment variable prefix
const ENV_PREFIX: &str = "NEWSHUB";

/// Default news/auth backend
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for local records (bookmarks, session)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Base URL of the news/auth backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Country code for headline queries
    #[serde(default = "default_country")]
    pub country: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Log file for the TUI (defaults to `<data_dir>/debug.log`)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            api_url: default_api_url(),
            country: default_country(),
            request_timeout_secs: default_request_timeout(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_API_URL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.api_url = val;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_COUNTRY", ENV_PREFIX)) {
            if !val.is_empty() {
                self.country = val.to_lowercase();
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with NEWSHUB_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("newshub")
            .join("config.toml")
    }

    /// Path of the bookmark record
    pub fn bookmarks_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", BOOKMARKS_KEY))
    }

    /// Path of the session record
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", SESSION_KEY))
    }

    /// Effective TUI log file
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }

    /// HTTP request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newshub")
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_country() -> String {
    "us".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "NEWSHUB_DATA_DIR",
        "NEWSHUB_API_URL",
        "NEWSHUB_COUNTRY",
        "NEWSHUB_CONFIG",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.country, "us");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.log_file.is_none());
        assert!(config.data_dir.ends_with("newshub"));
    }

    #[test]
    fn test_file_paths() {
        let config = Config {
            data_dir: PathBuf::from("/data/newshub"),
            ..Config::default()
        };

        assert_eq!(
            config.bookmarks_path(),
            PathBuf::from("/data/newshub/bookmarkedArticles.json")
        );
        assert_eq!(config.session_path(), PathBuf::from("/data/newshub/user.json"));
        assert_eq!(config.log_path(), PathBuf::from("/data/newshub/debug.log"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("NEWSHUB_DATA_DIR", "/tmp/newshub-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/newshub-test"));
    }

    #[test]
    fn test_env_override_api_url_and_country() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("NEWSHUB_API_URL", "https://news.example.com");
        env::set_var("NEWSHUB_COUNTRY", "GB");
        config.apply_env_overrides();
        assert_eq!(config.api_url, "https://news.example.com");
        assert_eq!(config.country, "gb");

        // Empty values are ignored
        env::set_var("NEWSHUB_API_URL", "");
        config.apply_env_overrides();
        assert_eq!(config.api_url, "https://news.example.com");
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            api_url = "https://api.example.com"
            request_timeout_secs = 5
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.api_url, "https://api.example.com");
        assert_eq!(config.request_timeout_secs, 5);
        // Unset keys keep defaults
        assert_eq!(config.country, "us");
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            api_url: "https://api.example.com".to_string(),
            country: "de".to_string(),
            request_timeout_secs: 12,
            log_file: Some(temp_dir.path().join("tui.log")),
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert_eq!(loaded.api_url, config.api_url);
        assert_eq!(loaded.country, "de");
        assert_eq!(loaded.log_file, config.log_file);
        // Loading creates the data directory
        assert!(config.data_dir.exists());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        env::set_var("NEWSHUB_DATA_DIR", temp_dir.path());

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.data_dir, temp_dir.path());
    }
}
