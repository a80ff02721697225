//! Bagging ensemble configuration.

use fundus_traits::{FundusError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for [`BaggingEnsemble`](crate::BaggingEnsemble).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Share of the training rows drawn (with replacement) per round, in (0, 1]
    pub bagging_fraction: f64,

    /// Number of bootstrap rounds, and thus fitted members (default: 20)
    pub models_cnt: usize,

    /// Seed of the bootstrap stream; `None` draws a fresh seed per fit
    pub seed: Option<u64>,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            bagging_fraction: 0.8,
            models_cnt: 20,
            seed: None,
        }
    }
}

impl EnsembleConfig {
    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`FundusError::InvalidConfig`] if `models_cnt` is zero or
    /// `bagging_fraction` is outside (0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.models_cnt == 0 {
            return Err(FundusError::InvalidConfig(
                "models_cnt must be at least 1".to_string(),
            ));
        }
        if !(self.bagging_fraction > 0.0 && self.bagging_fraction <= 1.0) {
            return Err(FundusError::InvalidConfig(format!(
                "bagging_fraction must be in (0, 1], got {}",
                self.bagging_fraction
            )));
        }
        Ok(())
    }

    /// Rows drawn per round for a training set of `rows` rows.
    pub fn sample_size(&self, rows: usize) -> usize {
        (rows as f64 * self.bagging_fraction).floor() as usize
    }
}
