use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::search::simulated::DEFAULT_SEARCH_DELAY;

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone, PartialEq)]
pub struct ScoutConfig {
    /// File standing in for browser local storage
    pub storage_path: PathBuf,
    /// Latency of the simulated search backend
    pub search_delay: Duration,
    /// Listings and reviews API; `None` keeps everything local and simulated
    pub api_base_url: Option<String>,
    pub log_level: String,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from("scout_storage.json"),
            search_delay: DEFAULT_SEARCH_DELAY,
            api_base_url: None,
            log_level: "info".to_string(),
        }
    }
}

impl ScoutConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source; missing or blank values take defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let storage_path = read("SCOUT_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_path);

        let search_delay = match read("SCOUT_SEARCH_DELAY_MS") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "SCOUT_SEARCH_DELAY_MS",
                    value,
                })?,
            None => defaults.search_delay,
        };

        let api_base_url = match read("SCOUT_API_BASE_URL") {
            Some(value) => {
                let trimmed = value.trim();
                if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                    return Err(ConfigError::InvalidUrl {
                        name: "SCOUT_API_BASE_URL",
                        value,
                    });
                }
                Some(trimmed.trim_end_matches('/').to_string())
            }
            None => None,
        };

        let log_level = read("SCOUT_LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Self {
            storage_path,
            search_delay,
            api_base_url,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ScoutConfig::from_lookup(lookup(&[])).expect("defaults load");
        assert_eq!(config, ScoutConfig::default());
        assert_eq!(config.search_delay, Duration::from_millis(1500));
    }

    #[test]
    fn reads_overrides() {
        let config = ScoutConfig::from_lookup(lookup(&[
            ("SCOUT_STORAGE_PATH", "/tmp/scout.json"),
            ("SCOUT_SEARCH_DELAY_MS", "25"),
            ("SCOUT_API_BASE_URL", "https://api.example.com/"),
            ("SCOUT_LOG_LEVEL", "debug"),
        ]))
        .expect("config loads");

        assert_eq!(config.storage_path, PathBuf::from("/tmp/scout.json"));
        assert_eq!(config.search_delay, Duration::from_millis(25));
        assert_eq!(config.api_base_url.as_deref(), Some("https://api.example.com"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn rejects_bad_delay_and_url() {
        let err = ScoutConfig::from_lookup(lookup(&[("SCOUT_SEARCH_DELAY_MS", "soon")]))
            .expect_err("delay must be numeric");
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));

        let err = ScoutConfig::from_lookup(lookup(&[("SCOUT_API_BASE_URL", "ftp://x")]))
            .expect_err("url must be http");
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
