//! Configuration handling
//!
//! Configuration lives in `~/.config/pawpal/config.toml` (platform
//! equivalent via `directories`). Everything has a default; a missing or
//! unparseable config file falls back to those defaults rather than
//! failing startup.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Snapshot file name inside the data directory
const SNAPSHOT_FILE: &str = "owner.json";

/// User configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the snapshot file location
    pub data_file: Option<PathBuf>,

    /// Display name for a freshly created owner
    pub owner_name: Option<String>,
}

impl Config {
    /// Loads the global config, falling back to defaults on any failure
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        toml::from_str(&contents).unwrap_or_default()
    }

    /// Returns the path of the global config file, if a home exists
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "pawpal").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Resolves the snapshot path: config override, else platform data dir
    pub fn data_file(&self) -> PathBuf {
        if let Some(path) = &self.data_file {
            return path.clone();
        }
        ProjectDirs::from("", "", "pawpal")
            .map(|dirs| dirs.data_dir().join(SNAPSHOT_FILE))
            .unwrap_or_else(|| PathBuf::from(SNAPSHOT_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_a_data_file() {
        let config = Config::default();
        assert!(config.data_file().ends_with(SNAPSHOT_FILE));
    }

    #[test]
    fn data_file_override_wins() {
        let config = Config {
            data_file: Some(PathBuf::from("/tmp/custom.json")),
            owner_name: None,
        };
        assert_eq!(config.data_file(), PathBuf::from("/tmp/custom.json"));
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: Config = toml::from_str("data_file = \"pets.json\"\n").unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("pets.json")));
        assert_eq!(config.owner_name, None);
    }
}
