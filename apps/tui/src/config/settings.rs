use std::env;
use std::path::PathBuf;

use chartkit::reveal::DEFAULT_THRESHOLD;
use dotenv::dotenv;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("DATA_MODULES_REVEAL_THRESHOLD must be a number in [0, 1], got {0:?}")]
    InvalidThreshold(String),
}

/// Resolved runtime settings. Flags are folded into the environment first
/// (see `CliArgs::apply_env_overrides`), so the environment is the single
/// source read here.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Page to open first; the first bundled page when unset.
    pub page: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub reveal_threshold: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page: None,
            export_dir: None,
            reveal_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// Builds a config from any key lookup; `init_app_config` passes the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let reveal_threshold = match non_empty("DATA_MODULES_REVEAL_THRESHOLD") {
            None => DEFAULT_THRESHOLD,
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| (0.0..=1.0).contains(value))
                .ok_or(ConfigError::InvalidThreshold(raw))?,
        };

        Ok(Self {
            page: non_empty("DATA_MODULES_PAGE"),
            export_dir: non_empty("DATA_MODULES_EXPORT_DIR").map(PathBuf::from),
            reveal_threshold,
        })
    }
}

/// Loads `.env` (if present) and resolves the application configuration.
pub fn init_app_config() -> color_eyre::eyre::Result<AppConfig> {
    dotenv().ok();
    let config = AppConfig::from_lookup(|key| env::var(key).ok())?;
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DATA_MODULES_PAGE", "coastal-tourism"),
            ("DATA_MODULES_EXPORT_DIR", "out/svg"),
            ("DATA_MODULES_REVEAL_THRESHOLD", "0.5"),
        ]))
        .unwrap();
        assert_eq!(config.page.as_deref(), Some("coastal-tourism"));
        assert_eq!(config.export_dir, Some(PathBuf::from("out/svg")));
        assert!((config.reveal_threshold - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = AppConfig::from_lookup(lookup(&[("DATA_MODULES_PAGE", "  ")])).unwrap();
        assert_eq!(config.page, None);
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let error = AppConfig::from_lookup(lookup(&[("DATA_MODULES_REVEAL_THRESHOLD", "1.5")]))
            .unwrap_err();
        assert_eq!(error, ConfigError::InvalidThreshold("1.5".to_string()));
    }
}
