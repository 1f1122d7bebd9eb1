//! Application configuration: TOML file with every section optional.
//!
//! The API key is deliberately absent from this file format; it comes from
//! the environment through [`AdvisoryConfig::with_env_credential`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::advisory::AdvisoryConfig;
use crate::domain::{CandleData, Instrument};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Start-up configuration shared by the TUI and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub target_profit: f64,
    pub candle: CandleData,
    pub instruments: Vec<Instrument>,
    pub advisory: AdvisoryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target_profit: 1.0,
            candle: CandleData::default(),
            instruments: Instrument::defaults(),
            advisory: AdvisoryConfig::default(),
        }
    }
}

impl AppConfig {
    /// `<config_dir>/tradesize/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tradesize").join("config.toml"))
    }

    /// Load from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the configuration for a binary.
    ///
    /// An explicit path must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Target profit with unusable values mapped to zero.
    pub fn sanitized_target_profit(&self) -> f64 {
        if self.target_profit.is_finite() && self.target_profit > 0.0 {
            self.target_profit
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.target_profit, 1.0);
        assert_eq!(cfg.instruments.len(), 4);
    }

    #[test]
    fn partial_sections() {
        let cfg = AppConfig::from_toml(
            r#"
            target_profit = 50.0

            [candle]
            open = 100.0
            high = 110.0
            low = 95.0
            close = 105.0

            [[instruments]]
            id = "gold"
            name = "Gold Micro"
            lot_size = 10.0

            [advisory]
            model = "gemini-2.0-flash"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.target_profit, 50.0);
        assert_eq!(cfg.candle.high, 110.0);
        assert_eq!(cfg.instruments.len(), 1);
        assert_eq!(cfg.instruments[0].id.as_str(), "gold");
        assert_eq!(cfg.advisory.model, "gemini-2.0-flash");
        assert_eq!(cfg.advisory.base_url, crate::advisory::DEFAULT_BASE_URL);
        assert!(cfg.advisory.api_key.is_none());
    }

    #[test]
    fn api_key_in_file_is_ignored() {
        let cfg = AppConfig::from_toml("[advisory]\napi_key = \"leaked\"\n").unwrap();
        assert!(cfg.advisory.api_key.is_none());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        assert!(matches!(AppConfig::from_toml("target_profit = ["), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_explicit_file_is_read_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/tradesize.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn sanitized_target_profit() {
        let mut cfg = AppConfig::default();
        cfg.target_profit = -5.0;
        assert_eq!(cfg.sanitized_target_profit(), 0.0);
        cfg.target_profit = f64::NAN;
        assert_eq!(cfg.sanitized_target_profit(), 0.0);
        cfg.target_profit = 25.0;
        assert_eq!(cfg.sanitized_target_profit(), 25.0);
    }
}
