//! Daily market-data feature extraction aligned to quarterly anchors.

use fundus_traits::{FeatureRecord, FundusError, Result, TickerSeries};
use tracing::debug;

use crate::config::{FeatureConfig, Window};
use crate::window::{bind, write_window_features};

/// Feature-name prefix for daily statistics.
pub const DAILY_PREFIX: &str = "daily";

/// Computes daily window statistics as of each quarterly anchor date.
///
/// The anchors are the same as those of
/// [`QuarterlyFeatureExtractor`](crate::QuarterlyFeatureExtractor), so the two
/// outputs can be joined on `(ticker, date)`. Only daily rows dated strictly
/// before an anchor are visible to it; anchors with no earlier daily rows are
/// skipped.
#[derive(Debug, Clone)]
pub struct DailyFeatureExtractor {
    config: FeatureConfig,
    windows: Vec<Window>,
}

impl DailyFeatureExtractor {
    /// Create a new extractor with the given configuration.
    #[must_use]
    pub fn new(config: FeatureConfig) -> Self {
        let windows = config.daily_catalogue();
        Self { config, windows }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Extracts one record per back-quarter offset that has prior daily data.
    ///
    /// # Errors
    ///
    /// Returns an error if the two series belong to different tickers, a
    /// configured daily column is missing, or the back-quarter bounds are
    /// inverted.
    pub fn extract(
        &self,
        quarterly: &TickerSeries,
        daily: &TickerSeries,
    ) -> Result<Vec<FeatureRecord>> {
        if quarterly.ticker() != daily.ticker() {
            return Err(FundusError::InvalidData(format!(
                "quarterly rows for {} paired with daily rows for {}",
                quarterly.ticker(),
                daily.ticker()
            )));
        }

        let offsets = self.config.offset_range(quarterly.len())?;
        let windows = bind(daily, &self.windows)?;

        let mut records = Vec::with_capacity(offsets.len());
        for offset in offsets {
            let Some(&anchor) = quarterly.dates().get(offset) else {
                continue;
            };

            let start = daily.rows_on_or_after(anchor);
            if start == daily.len() {
                debug!(ticker = daily.ticker(), %anchor, "no daily rows before anchor");
                continue;
            }

            let mut record = FeatureRecord::new(quarterly.ticker(), anchor);
            write_window_features(&mut record, DAILY_PREFIX, &windows, start);
            records.push(record);
        }

        debug!(
            ticker = daily.ticker(),
            days = daily.len(),
            records = records.len(),
            "extracted daily features"
        );
        Ok(records)
    }
}

impl Default for DailyFeatureExtractor {
    fn default() -> Self {
        Self::new(FeatureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Datelike, Days};
    use fundus_traits::Date;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd_opt(y, m, day).unwrap()
    }

    fn quarters() -> TickerSeries {
        TickerSeries::new(
            "AAPL",
            vec![d(2021, 7, 1), d(2021, 4, 1), d(2021, 1, 1), d(2020, 10, 1)],
        )
        .unwrap()
    }

    fn config(widths: Vec<usize>) -> FeatureConfig {
        FeatureConfig {
            daily_columns: vec!["pe".to_string()],
            daily_windows: widths,
            ..Default::default()
        }
    }

    #[test]
    fn test_anchor_day_is_excluded() {
        let daily = TickerSeries::new("AAPL", vec![d(2021, 7, 1), d(2021, 6, 30), d(2021, 6, 29)])
            .unwrap()
            .with_column("pe", vec![1000.0, 20.0, 10.0])
            .unwrap();

        let records = DailyFeatureExtractor::new(config(vec![100]))
            .extract(&quarters(), &daily)
            .unwrap();

        // Only the 2021-07-01 anchor has earlier daily rows.
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, d(2021, 7, 1));
        assert_relative_eq!(records[0].get("daily_series_100_pe_max").unwrap(), 20.0);
        assert_relative_eq!(records[0].get("daily_diffs_100_pe_mean").unwrap(), 10.0);
    }

    #[test]
    fn test_window_counts_trading_rows() {
        let dates: Vec<Date> = (0..10).map(|i| d(2021, 6, 30) - Days::new(i)).collect();
        let values: Vec<f64> = (0..10).map(|i| (10 - i) as f64).collect();
        let daily = TickerSeries::new("AAPL", dates)
            .unwrap()
            .with_column("pe", values)
            .unwrap();

        let records = DailyFeatureExtractor::new(config(vec![3]))
            .extract(&quarters(), &daily)
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_relative_eq!(records[0].get("daily_series_3_pe_mean").unwrap(), 9.0);
        assert_relative_eq!(records[0].get("daily_series_3_pe_min").unwrap(), 8.0);
    }

    #[test]
    fn test_no_look_ahead_randomized() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let quarterly = quarters();
        let origin = d(2021, 9, 1);

        for _ in 0..50 {
            // Irregular trading calendar with values encoding their own age.
            let mut offsets: Vec<u64> = (0..rng.gen_range(1..400))
                .map(|_| rng.gen_range(0..365))
                .collect();
            offsets.sort_unstable();
            offsets.dedup();

            let dates: Vec<Date> = offsets.iter().map(|&o| origin - Days::new(o)).collect();
            let stamps: Vec<f64> = dates
                .iter()
                .map(|date| date.num_days_from_ce() as f64)
                .collect();
            let daily = TickerSeries::new("AAPL", dates.clone())
                .unwrap()
                .with_column("pe", stamps)
                .unwrap();

            let records = DailyFeatureExtractor::new(config(vec![800]))
                .extract(&quarterly, &daily)
                .unwrap();

            for record in &records {
                let latest = record.get("daily_series_800_pe_max").unwrap();
                assert!(latest < record.date.num_days_from_ce() as f64);
            }

            let anchors_with_history = quarterly.dates()[..3]
                .iter()
                .filter(|anchor| dates.iter().any(|day| day < *anchor))
                .count();
            assert_eq!(records.len(), anchors_with_history);
        }
    }

    #[test]
    fn test_ticker_mismatch_is_error() {
        let daily = TickerSeries::new("MSFT", vec![d(2021, 1, 1)])
            .unwrap()
            .with_column("pe", vec![1.0])
            .unwrap();
        let result = DailyFeatureExtractor::new(config(vec![2])).extract(&quarters(), &daily);
        assert!(matches!(result, Err(FundusError::InvalidData(_))));
    }

    #[test]
    fn test_missing_daily_column_is_error() {
        let daily = TickerSeries::new("AAPL", vec![d(2021, 1, 1)]).unwrap();
        let result = DailyFeatureExtractor::default().extract(&quarters(), &daily);
        assert!(matches!(result, Err(FundusError::MissingColumn(_))));
    }
}
