//! Distributional statistics over sparse numeric windows.
//!
//! [`SeriesStats`] is evaluated for every (column, window) pair of every
//! as-of point, so it never fails: NaN entries are dropped and an empty
//! remainder resolves every statistic to NaN.

use serde::{Deserialize, Serialize};

/// Names of the statistics in [`SeriesStats::iter`] order.
pub const STAT_NAMES: [&str; 5] = ["mean", "median", "max", "min", "std"];

/// Mean, median, extremes and population standard deviation of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (average of the two middle values for even counts).
    pub median: f64,
    /// Largest value.
    pub max: f64,
    /// Smallest value.
    pub min: f64,
    /// Population standard deviation (N denominator).
    pub std: f64,
}

impl SeriesStats {
    /// All statistics set to NaN.
    pub const MISSING: Self = Self {
        mean: f64::NAN,
        median: f64::NAN,
        max: f64::NAN,
        min: f64::NAN,
        std: f64::NAN,
    };

    /// Computes statistics over the non-NaN entries of `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fundus_traits::SeriesStats;
    ///
    /// let stats = SeriesStats::compute(&[3.0, f64::NAN, 1.0, 2.0]);
    /// assert_eq!(stats.median, 2.0);
    /// assert_eq!(stats.max, 3.0);
    ///
    /// let empty = SeriesStats::compute(&[]);
    /// assert!(empty.mean.is_nan());
    /// ```
    pub fn compute(values: &[f64]) -> Self {
        let mut present: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if present.is_empty() {
            return Self::MISSING;
        }

        present.sort_by(f64::total_cmp);

        let n = present.len();
        let mean = present.iter().sum::<f64>() / n as f64;
        let variance = present.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            present[n / 2]
        } else {
            (present[n / 2 - 1] + present[n / 2]) / 2.0
        };

        Self {
            mean,
            median,
            max: present[n - 1],
            min: present[0],
            std: variance.sqrt(),
        }
    }

    /// Yields `(name, value)` pairs in [`STAT_NAMES`] order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        STAT_NAMES
            .into_iter()
            .zip([self.mean, self.median, self.max, self.min, self.std])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_basic_stats() {
        let stats = SeriesStats::compute(&[1.0, 2.0, 3.0, 4.0]);

        assert_relative_eq!(stats.mean, 2.5);
        assert_relative_eq!(stats.median, 2.5);
        assert_relative_eq!(stats.max, 4.0);
        assert_relative_eq!(stats.min, 1.0);
        assert_relative_eq!(stats.std, 1.25_f64.sqrt());
    }

    #[test]
    fn test_odd_count_median() {
        let stats = SeriesStats::compute(&[9.0, -1.0, 4.0]);
        assert_relative_eq!(stats.median, 4.0);
    }

    #[test]
    fn test_empty_is_missing() {
        let stats = SeriesStats::compute(&[]);
        assert_eq!(stats.iter().count(), 5);
        assert!(stats.iter().all(|(_, v)| v.is_nan()));
    }

    #[test]
    fn test_all_nan_is_missing() {
        let stats = SeriesStats::compute(&[f64::NAN, f64::NAN]);
        assert!(stats.iter().all(|(_, v)| v.is_nan()));
    }

    #[test]
    fn test_nan_entries_dropped() {
        let stats = SeriesStats::compute(&[f64::NAN, 5.0, f64::NAN, 7.0]);

        assert_relative_eq!(stats.mean, 6.0);
        assert_relative_eq!(stats.std, 1.0);
        assert_relative_eq!(stats.min, 5.0);
    }

    #[test]
    fn test_single_value_has_zero_std() {
        let stats = SeriesStats::compute(&[42.0]);
        assert_relative_eq!(stats.std, 0.0);
        assert_relative_eq!(stats.median, 42.0);
    }

    #[test]
    fn test_ordering_invariant() {
        let values = [0.3, -12.0, 8.5, f64::NAN, 1e6, 4.0, 4.0];
        let stats = SeriesStats::compute(&values);

        assert!(stats.min <= stats.median);
        assert!(stats.median <= stats.max);
    }

    #[test]
    fn test_iter_names() {
        let names: Vec<&str> = SeriesStats::compute(&[1.0]).iter().map(|(n, _)| n).collect();
        assert_eq!(names, STAT_NAMES);
    }
}
