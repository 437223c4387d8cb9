use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};

pub const CONFIG_DIR_NAME: &str = ".soragen";
pub const CONFIG_FILE: &str = "config.json";

const DEFAULT_SAVE_LOCATION: &str = "./videos";

/// Persisted settings, written by the setup screen and read once at
/// startup. Keys stay camelCase on disk for compatibility with configs
/// written by earlier clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub api_key: String,
    pub save_location: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            save_location: DEFAULT_SAVE_LOCATION.to_string(),
        }
    }
}

impl Config {
    /// `~/.soragen`, shared by the config file and the log file.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_DIR_NAME))
    }

    /// Read the persisted config, letting `OPENAI_API_KEY` fill in a
    /// missing key. Falls back to defaults when nothing is stored.
    pub fn load() -> Self {
        let mut config = Self::config_dir()
            .and_then(|dir| Self::read_from(&dir.join(CONFIG_FILE)))
            .unwrap_or_default();

        if config.api_key.is_empty() {
            if let Ok(key) = std::env::var("OPENAI_API_KEY") {
                config.api_key = key;
            }
        }

        config
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let dir = Self::config_dir().context("no home directory")?;
        self.save_to(&dir)
    }

    pub fn save_dir(&self) -> PathBuf {
        PathBuf::from(&self.save_location)
    }

    fn read_from(path: &Path) -> Option<Self> {
        let raw = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!("ignoring malformed config at {}: {err}", path.display());
                None
            }
        }
    }

    fn save_to(&self, dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let path = dir.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            api_key: "sk-test".to_string(),
            save_location: "/videos".to_string(),
        };

        config.save_to(dir.path()).unwrap();
        let loaded = Config::read_from(&dir.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_camel_case_keys_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        Config::default().save_to(dir.path()).unwrap();

        let raw = fs::read_to_string(dir.path().join(CONFIG_FILE)).unwrap();
        assert!(raw.contains("\"apiKey\""));
        assert!(raw.contains("\"saveLocation\""));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::read_from(&dir.path().join(CONFIG_FILE)).is_none());
    }

    #[test]
    fn test_malformed_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{not json").unwrap();

        assert!(Config::read_from(&path).is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"apiKey": "sk-only"}"#).unwrap();

        let loaded = Config::read_from(&path).unwrap();
        assert_eq!(loaded.api_key, "sk-only");
        assert_eq!(loaded.save_location, DEFAULT_SAVE_LOCATION);
    }
}
