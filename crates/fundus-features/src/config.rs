//! Feature extraction configuration.

use std::ops::Range;

use fundus_traits::{FundusError, Result};
use serde::{Deserialize, Serialize};

/// Default upper bound on the back-quarter offset.
pub const MAX_BACK_QUARTER: usize = 20;

/// Default lower bound on the back-quarter offset.
pub const MIN_BACK_QUARTER: usize = 0;

/// Default quarterly window widths, in quarters.
pub const QUARTER_WINDOWS: [usize; 3] = [2, 4, 10];

/// Default quarterly metric columns.
pub const QUARTER_COLUMNS: [&str; 16] = [
    "revenue",
    "netinc",
    "ncf",
    "assets",
    "ebitda",
    "debt",
    "fcf",
    "gp",
    "workingcapital",
    "cashneq",
    "rnd",
    "sgna",
    "ncfx",
    "divyield",
    "currentratio",
    "netinccmn",
];

/// Default daily window widths, in trading days.
pub const DAILY_WINDOWS: [usize; 4] = [100, 200, 400, 800];

/// Default daily aggregate columns.
pub const DAILY_AGG_COLUMNS: [&str; 2] = ["marketcap", "pe"];

/// A (column, width) pair a statistic block is computed over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    /// Metric column name
    pub column: String,
    /// Number of most recent rows
    pub width: usize,
}

/// Configuration for quarterly and daily feature extraction.
///
/// Every field has a default, so a partial JSON document only overrides what
/// it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Quarterly metric columns to process (default: [`QUARTER_COLUMNS`])
    pub quarter_columns: Vec<String>,

    /// Quarterly window widths (default: [`QUARTER_WINDOWS`])
    pub quarter_windows: Vec<usize>,

    /// Daily aggregate columns to process (default: [`DAILY_AGG_COLUMNS`])
    pub daily_columns: Vec<String>,

    /// Daily window widths (default: [`DAILY_WINDOWS`])
    pub daily_windows: Vec<usize>,

    /// Exclusive upper bound on the back-quarter offset (default: 20)
    pub max_back_quarter: usize,

    /// Inclusive lower bound on the back-quarter offset (default: 0)
    pub min_back_quarter: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            quarter_columns: QUARTER_COLUMNS.iter().map(|c| c.to_string()).collect(),
            quarter_windows: QUARTER_WINDOWS.to_vec(),
            daily_columns: DAILY_AGG_COLUMNS.iter().map(|c| c.to_string()).collect(),
            daily_windows: DAILY_WINDOWS.to_vec(),
            max_back_quarter: MAX_BACK_QUARTER,
            min_back_quarter: MIN_BACK_QUARTER,
        }
    }
}

impl FeatureConfig {
    /// Quarterly windows, column-major.
    pub fn quarter_catalogue(&self) -> Vec<Window> {
        catalogue(&self.quarter_columns, &self.quarter_windows)
    }

    /// Daily windows, column-major.
    pub fn daily_catalogue(&self) -> Vec<Window> {
        catalogue(&self.daily_columns, &self.daily_windows)
    }

    /// Back-quarter offsets to examine for a table of `rows` quarters.
    ///
    /// Both bounds are clamped to `rows - 1`, so the newest quarter of a
    /// short history is never an as-of point on its own.
    ///
    /// # Errors
    ///
    /// Returns [`FundusError::InvalidConfig`] if the clamped minimum exceeds
    /// the clamped maximum.
    pub fn offset_range(&self, rows: usize) -> Result<Range<usize>> {
        let Some(last) = rows.checked_sub(1) else {
            return Ok(0..0);
        };

        let max = self.max_back_quarter.min(last);
        let min = self.min_back_quarter.min(last);
        if min > max {
            return Err(FundusError::InvalidConfig(format!(
                "min_back_quarter ({min}) exceeds max_back_quarter ({max}) for {rows} rows"
            )));
        }

        Ok(min..max)
    }
}

fn catalogue(columns: &[String], widths: &[usize]) -> Vec<Window> {
    columns
        .iter()
        .flat_map(|column| {
            widths.iter().map(move |&width| Window {
                column: column.clone(),
                width,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Cadence, column_names};

    #[test]
    fn test_default_config() {
        let config = FeatureConfig::default();
        assert_eq!(config.quarter_columns.len(), 16);
        assert_eq!(config.quarter_windows, vec![2, 4, 10]);
        assert_eq!(config.daily_columns, vec!["marketcap", "pe"]);
        assert_eq!(config.daily_windows, vec![100, 200, 400, 800]);
        assert_eq!(config.max_back_quarter, 20);
        assert_eq!(config.min_back_quarter, 0);
    }

    #[test]
    fn test_defaults_are_catalogued() {
        let quarterly = column_names(Cadence::Quarterly);
        assert!(QUARTER_COLUMNS.iter().all(|c| quarterly.iter().any(|q| q == c)));

        let daily = column_names(Cadence::Daily);
        assert!(DAILY_AGG_COLUMNS.iter().all(|c| daily.iter().any(|d| d == c)));
    }

    #[test]
    fn test_catalogue_order() {
        let config = FeatureConfig {
            quarter_columns: vec!["revenue".to_string(), "debt".to_string()],
            quarter_windows: vec![2, 4],
            ..Default::default()
        };
        let windows = config.quarter_catalogue();
        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0].column, "revenue");
        assert_eq!(windows[1].width, 4);
        assert_eq!(windows[2].column, "debt");
        assert_eq!(config.daily_catalogue().len(), 8);
    }

    #[test]
    fn test_offset_range_clamps_to_history() {
        let config = FeatureConfig::default();
        assert_eq!(config.offset_range(5).unwrap(), 0..4);
        assert_eq!(config.offset_range(40).unwrap(), 0..20);
        assert_eq!(config.offset_range(1).unwrap(), 0..0);
        assert_eq!(config.offset_range(0).unwrap(), 0..0);
    }

    #[test]
    fn test_offset_range_rejects_inverted_bounds() {
        let config = FeatureConfig {
            max_back_quarter: 2,
            min_back_quarter: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.offset_range(10),
            Err(FundusError::InvalidConfig(_))
        ));
        // Both bounds clamp to the last row of a short table.
        assert_eq!(config.offset_range(2).unwrap(), 1..1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FeatureConfig =
            serde_json::from_str(r#"{"max_back_quarter": 8, "daily_windows": [5]}"#).unwrap();
        assert_eq!(config.max_back_quarter, 8);
        assert_eq!(config.daily_windows, vec![5]);
        assert_eq!(config.quarter_windows, vec![2, 4, 10]);
    }
}
