//! Window statistics shared by the quarterly and daily extractors.

use fundus_traits::{FeatureRecord, Result, SeriesStats, TickerSeries};

use crate::config::Window;

/// A window whose column has been resolved against one series.
#[derive(Debug)]
pub(crate) struct BoundWindow<'a> {
    column: &'a str,
    width: usize,
    values: &'a [f64],
}

/// Resolves every window's column in `series` up front.
pub(crate) fn bind<'a>(
    series: &'a TickerSeries,
    windows: &'a [Window],
) -> Result<Vec<BoundWindow<'a>>> {
    windows
        .iter()
        .map(|w| {
            Ok(BoundWindow {
                column: &w.column,
                width: w.width,
                values: series.require_column(&w.column)?,
            })
        })
        .collect()
}

/// Writes series and diff statistics for every window, reading rows from
/// `start` onward.
///
/// Windows wider than the remaining rows are truncated. Diffs are taken
/// newest-minus-older between neighbours, which yields the same set of values
/// as differencing in chronological order.
pub(crate) fn write_window_features(
    record: &mut FeatureRecord,
    prefix: &str,
    windows: &[BoundWindow<'_>],
    start: usize,
) {
    for window in windows {
        let rows = &window.values[start..];
        let series = &rows[..window.width.min(rows.len())];
        let diffs: Vec<f64> = series.windows(2).map(|w| w[0] - w[1]).collect();

        for (kind, values) in [("series", series), ("diffs", diffs.as_slice())] {
            let stats = SeriesStats::compute(values);
            for (stat, value) in stats.iter() {
                record.insert(
                    feature_name(prefix, kind, window.width, window.column, stat),
                    value,
                );
            }
        }
    }
}

/// `{prefix}_{kind}_{width}_{column}_{stat}`
pub fn feature_name(prefix: &str, kind: &str, width: usize, column: &str, stat: &str) -> String {
    format!("{prefix}_{kind}_{width}_{column}_{stat}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fundus_traits::Date;

    fn series(values: Vec<f64>) -> TickerSeries {
        let start = Date::from_ymd_opt(2022, 1, 1).unwrap();
        let dates = (0..values.len())
            .map(|i| start - chrono::Days::new(i as u64))
            .collect();
        TickerSeries::new("TEST", dates)
            .unwrap()
            .with_column("x", values)
            .unwrap()
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(
            feature_name("quarter", "diffs", 4, "revenue", "std"),
            "quarter_diffs_4_revenue_std"
        );
    }

    #[test]
    fn test_window_truncates_without_padding() {
        let s = series(vec![3.0, 2.0, 1.0]);
        let windows = vec![Window {
            column: "x".to_string(),
            width: 10,
        }];
        let bound = bind(&s, &windows).unwrap();

        let mut record = FeatureRecord::new("TEST", s.dates()[0]);
        write_window_features(&mut record, "quarter", &bound, 0);

        assert_relative_eq!(record.get("quarter_series_10_x_mean").unwrap(), 2.0);
        assert_relative_eq!(record.get("quarter_series_10_x_min").unwrap(), 1.0);
        // Two diffs from three values, both +1 in chronological order.
        assert_relative_eq!(record.get("quarter_diffs_10_x_mean").unwrap(), 1.0);
        assert_relative_eq!(record.get("quarter_diffs_10_x_std").unwrap(), 0.0);
        assert_eq!(record.len(), 10);
    }

    #[test]
    fn test_window_reads_from_start() {
        let s = series(vec![100.0, 10.0, 4.0, 1.0]);
        let windows = vec![Window {
            column: "x".to_string(),
            width: 2,
        }];
        let bound = bind(&s, &windows).unwrap();

        let mut record = FeatureRecord::new("TEST", s.dates()[1]);
        write_window_features(&mut record, "quarter", &bound, 1);

        assert_relative_eq!(record.get("quarter_series_2_x_max").unwrap(), 10.0);
        assert_relative_eq!(record.get("quarter_diffs_2_x_mean").unwrap(), 6.0);
    }

    #[test]
    fn test_single_row_has_missing_diffs() {
        let s = series(vec![5.0]);
        let windows = vec![Window {
            column: "x".to_string(),
            width: 2,
        }];
        let bound = bind(&s, &windows).unwrap();

        let mut record = FeatureRecord::new("TEST", s.dates()[0]);
        write_window_features(&mut record, "daily", &bound, 0);

        assert_relative_eq!(record.get("daily_series_2_x_median").unwrap(), 5.0);
        assert!(record.get("daily_diffs_2_x_mean").unwrap().is_nan());
    }

    #[test]
    fn test_bind_missing_column() {
        let s = series(vec![1.0]);
        let windows = vec![Window {
            column: "missing".to_string(),
            width: 2,
        }];
        assert!(bind(&s, &windows).is_err());
    }
}
