//! Quarterly fundamentals feature extraction.

use fundus_traits::{FeatureRecord, Result, TickerSeries};
use tracing::debug;

use crate::config::{FeatureConfig, Window};
use crate::window::{bind, write_window_features};

/// Feature-name prefix for quarterly statistics.
pub const QUARTER_PREFIX: &str = "quarter";

/// Walks a company's quarterly history backward and emits one feature record
/// per as-of quarter.
///
/// For back-quarter offset `k` the extractor sees only rows `k..`, i.e. what
/// was knowable as of the `k`-th most recent quarter. Each configured
/// (column, width) window contributes mean, median, max, min and std of the
/// newest `width` values and of their first differences, named
/// `quarter_{series|diffs}_{width}_{column}_{stat}`.
///
/// # Example
///
/// ```
/// use fundus_features::{FeatureConfig, QuarterlyFeatureExtractor};
/// use fundus_traits::{Date, TickerSeries};
///
/// let dates = vec![
///     Date::from_ymd_opt(2021, 7, 1).unwrap(),
///     Date::from_ymd_opt(2021, 4, 1).unwrap(),
///     Date::from_ymd_opt(2021, 1, 1).unwrap(),
/// ];
/// let series = TickerSeries::new("AAPL", dates)
///     .unwrap()
///     .with_column("revenue", vec![3.0, 2.0, 1.0])
///     .unwrap();
///
/// let config = FeatureConfig {
///     quarter_columns: vec!["revenue".to_string()],
///     ..Default::default()
/// };
/// let records = QuarterlyFeatureExtractor::new(config).extract(&series).unwrap();
/// assert_eq!(records.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct QuarterlyFeatureExtractor {
    config: FeatureConfig,
    windows: Vec<Window>,
}

impl QuarterlyFeatureExtractor {
    /// Create a new extractor with the given configuration.
    #[must_use]
    pub fn new(config: FeatureConfig) -> Self {
        let windows = config.quarter_catalogue();
        Self { config, windows }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Extracts one record per back-quarter offset.
    ///
    /// Records come out newest anchor first.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured column is missing from `quarterly`
    /// or the back-quarter bounds are inverted.
    pub fn extract(&self, quarterly: &TickerSeries) -> Result<Vec<FeatureRecord>> {
        let offsets = self.config.offset_range(quarterly.len())?;
        let windows = bind(quarterly, &self.windows)?;

        let mut records = Vec::with_capacity(offsets.len());
        for offset in offsets {
            let Some(&anchor) = quarterly.dates().get(offset) else {
                continue;
            };

            let mut record = FeatureRecord::new(quarterly.ticker(), anchor);
            write_window_features(&mut record, QUARTER_PREFIX, &windows, offset);
            records.push(record);
        }

        debug!(
            ticker = quarterly.ticker(),
            quarters = quarterly.len(),
            records = records.len(),
            "extracted quarterly features"
        );
        Ok(records)
    }
}

impl Default for QuarterlyFeatureExtractor {
    fn default() -> Self {
        Self::new(FeatureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fundus_traits::{Date, FundusError};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn revenue_only() -> FeatureConfig {
        FeatureConfig {
            quarter_columns: vec!["revenue".to_string()],
            ..Default::default()
        }
    }

    fn five_quarters() -> TickerSeries {
        let dates = vec![
            d(2021, 10, 1),
            d(2021, 7, 1),
            d(2021, 4, 1),
            d(2021, 1, 1),
            d(2020, 10, 1),
        ];
        TickerSeries::new("AAPL", dates)
            .unwrap()
            .with_column("revenue", vec![50.0, 40.0, 35.0, 20.0, 10.0])
            .unwrap()
    }

    #[test]
    fn test_five_quarters_emit_four_records() {
        let records = QuarterlyFeatureExtractor::new(revenue_only())
            .extract(&five_quarters())
            .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0].date, d(2021, 10, 1));
        assert_eq!(records[3].date, d(2021, 1, 1));
        assert!(records.windows(2).all(|w| w[0].date > w[1].date));
        assert!(records.iter().all(|r| r.ticker == "AAPL"));

        // 3 widths x {series, diffs} x 5 stats
        assert!(records.iter().all(|r| r.len() == 30));
        assert!(
            records
                .iter()
                .all(|r| r.get("quarter_series_2_revenue_mean").is_some())
        );
    }

    #[test]
    fn test_window_values_are_as_of_anchor() {
        let records = QuarterlyFeatureExtractor::new(revenue_only())
            .extract(&five_quarters())
            .unwrap();

        let newest = &records[0];
        assert_relative_eq!(newest.get("quarter_series_2_revenue_mean").unwrap(), 45.0);
        assert_relative_eq!(newest.get("quarter_diffs_2_revenue_mean").unwrap(), 10.0);

        // Offset 3 sees only the two oldest quarters, even for width 10.
        let oldest = &records[3];
        assert_relative_eq!(oldest.get("quarter_series_10_revenue_max").unwrap(), 20.0);
        assert_relative_eq!(oldest.get("quarter_series_10_revenue_mean").unwrap(), 15.0);
        assert_relative_eq!(oldest.get("quarter_diffs_10_revenue_median").unwrap(), 10.0);
    }

    #[test]
    fn test_record_count_respects_bounds() {
        let config = FeatureConfig {
            max_back_quarter: 3,
            min_back_quarter: 1,
            ..revenue_only()
        };
        let records = QuarterlyFeatureExtractor::new(config)
            .extract(&five_quarters())
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, d(2021, 7, 1));
    }

    #[test]
    fn test_short_histories_emit_nothing() {
        let extractor = QuarterlyFeatureExtractor::new(revenue_only());

        let empty = TickerSeries::new("AAPL", vec![])
            .unwrap()
            .with_column("revenue", vec![])
            .unwrap();
        assert!(extractor.extract(&empty).unwrap().is_empty());

        let single = TickerSeries::new("AAPL", vec![d(2021, 1, 1)])
            .unwrap()
            .with_column("revenue", vec![1.0])
            .unwrap();
        assert!(extractor.extract(&single).unwrap().is_empty());
    }

    #[test]
    fn test_sparse_history_yields_nan() {
        let dates = vec![d(2021, 7, 1), d(2021, 4, 1), d(2021, 1, 1)];
        let series = TickerSeries::new("MSFT", dates)
            .unwrap()
            .with_column("revenue", vec![f64::NAN, f64::NAN, 3.0])
            .unwrap();

        let records = QuarterlyFeatureExtractor::new(revenue_only())
            .extract(&series)
            .unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].get("quarter_series_2_revenue_mean").unwrap().is_nan());
        assert_relative_eq!(records[0].get("quarter_series_4_revenue_mean").unwrap(), 3.0);
    }

    #[test]
    fn test_missing_column_is_error() {
        let result = QuarterlyFeatureExtractor::default().extract(&five_quarters());
        assert!(matches!(result, Err(FundusError::MissingColumn(_))));
    }

    #[test]
    fn test_inverted_bounds_are_error() {
        let config = FeatureConfig {
            max_back_quarter: 1,
            min_back_quarter: 3,
            ..revenue_only()
        };
        let result = QuarterlyFeatureExtractor::new(config).extract(&five_quarters());
        assert!(matches!(result, Err(FundusError::InvalidConfig(_))));
    }
}
