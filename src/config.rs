use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::memory::weights::LayerWeights;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StrataConfig {
    pub log: LogConfig,
    pub ranking: RankingConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RankingConfig {
    pub top_k: usize,
    /// Validated on load: a table that does not sum to 1.0 fails to parse.
    pub weights: LayerWeights,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_k: 10,
            weights: LayerWeights::default(),
        }
    }
}

/// Returns `~/.strata/`, or `./.strata/` when no home directory is known.
pub fn default_strata_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".strata")
}

/// Returns the default config file path: `~/.strata/config.toml`
pub fn default_config_path() -> PathBuf {
    default_strata_dir().join("config.toml")
}

impl StrataConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            StrataConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (STRATA_LOG_LEVEL, STRATA_TOP_K).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("STRATA_LOG_LEVEL") {
            self.log.level = val;
        }
        if let Ok(val) = std::env::var("STRATA_TOP_K") {
            match val.parse() {
                Ok(top_k) => self.ranking.top_k = top_k,
                Err(_) => warn!("ignoring STRATA_TOP_K={val}: not a non-negative integer"),
            }
        }
    }
}
