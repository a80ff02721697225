//! Configuration file loading for the fundus CLI.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fundus_ensemble::EnsembleConfig;
use fundus_features::FeatureConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Environment variable naming the config file when `--config` is absent.
pub(crate) const CONFIG_ENV: &str = "FUNDUS_CONFIG";

/// Default config file, relative to the working directory.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "fundus.json";

/// Full pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct FundusConfig {
    /// Feature extraction settings
    pub(crate) features: FeatureConfig,

    /// Bagging ensemble settings
    pub(crate) ensemble: EnsembleConfig,
}

impl FundusConfig {
    /// Resolves the config path from the flag, then the environment, then the
    /// default file name.
    pub(crate) fn resolve_path(flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Loads the config at `path`; a missing file yields the defaults.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.ensemble.validate()?;

        info!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
