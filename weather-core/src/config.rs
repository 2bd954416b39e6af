use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::client::ClientConfig;

/// Environment variable holding the OpenWeatherMap API key.
pub const API_KEY_ENV: &str = "OPENWEATHERMAP_API_KEY";

/// Settings stored on disk. Every field is optional; unset fields fall back
/// to the client defaults.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Pick the API key: a non-empty environment value first, then the stored key.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.is_empty()))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Client settings for `api_key` with any stored overrides applied.
    pub fn client_config(&self, api_key: String) -> ClientConfig {
        let mut cfg = ClientConfig::new(api_key);
        if let Some(base_url) = &self.base_url {
            cfg = cfg.with_base_url(base_url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            cfg = cfg.with_timeout(Duration::from_secs(secs));
        }
        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

    #[test]
    fn env_key_wins_over_stored_key() {
        let cfg = Config {
            api_key: Some("FILE".into()),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_api_key(Some("ENV".into())).as_deref(), Some("ENV"));
    }

    #[test]
    fn empty_env_key_falls_back_to_stored_key() {
        let cfg = Config {
            api_key: Some("FILE".into()),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_api_key(Some(String::new())).as_deref(), Some("FILE"));
        assert_eq!(cfg.resolve_api_key(None).as_deref(), Some("FILE"));
    }

    #[test]
    fn no_key_anywhere() {
        let cfg = Config {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(cfg.resolve_api_key(None), None);
        assert_eq!(Config::default().resolve_api_key(Some(String::new())), None);
    }

    #[test]
    fn client_config_uses_defaults_when_unset() {
        let cfg = Config::default().client_config("KEY".into());
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn client_config_applies_overrides() {
        let cfg = Config {
            api_key: None,
            base_url: Some("http://localhost:9000".into()),
            timeout_secs: Some(3),
        }
        .client_config("KEY".into());

        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.base_url, "http://localhost:9000");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("SECRET".into());
        cfg.timeout_secs = Some(5);
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = \"soon\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
