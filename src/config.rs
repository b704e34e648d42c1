use crate::holidays::{DEFAULT_COUNTRY, DEFAULT_HOLIDAY_URL};
use crate::model::DEFAULT_GOAL_DAYS;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Holiday endpoint; `{year}` and `{country}` are substituted.
    #[serde(default = "default_holiday_api_url")]
    pub holiday_api_url: String,
    #[serde(default = "default_holiday_country")]
    pub holiday_country: String,
    #[serde(default = "default_fetch_holidays")]
    pub fetch_holidays: bool,
    #[serde(default = "default_goal_days")]
    pub default_goal_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            holiday_api_url: default_holiday_api_url(),
            holiday_country: default_holiday_country(),
            fetch_holidays: default_fetch_holidays(),
            default_goal_days: default_goal_days(),
        }
    }
}

impl Config {
    /// Reads `config.yml` from the user config directory; a missing file
    /// means defaults.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {:?}, using defaults", path);
            return Ok(Config::default());
        }
        let data = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
        let config: Config = serde_yaml::from_str(&data)
            .with_context(|| format!("parsing config file {:?}", path))?;
        Ok(config)
    }
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "domeer").map(|dirs| dirs.config_dir().join("config.yml"))
}

fn default_holiday_api_url() -> String {
    DEFAULT_HOLIDAY_URL.to_string()
}

fn default_holiday_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

fn default_fetch_holidays() -> bool {
    true
}

fn default_goal_days() -> u32 {
    DEFAULT_GOAL_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_goal_days, 30);
        assert!(config.fetch_holidays);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "holiday_country: PT\nfetch_holidays: false\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.holiday_country, "PT");
        assert!(!config.fetch_holidays);
        assert_eq!(config.holiday_api_url, DEFAULT_HOLIDAY_URL);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "default_goal_days: [oops").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
