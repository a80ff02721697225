//! Common types used throughout the fundus workspace.
//!
//! This module defines the per-company time series handed to the feature
//! extractors and the flat feature records they produce.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{FundusError, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A company identifier, typically an exchange ticker like "AAPL".
pub type Ticker = String;

/// One company's dated rows with named numeric columns.
///
/// Rows are ordered strictly newest-first. Both quarterly fundamentals and
/// daily market aggregates use this shape; missing observations are stored
/// as `f64::NAN`.
///
/// # Example
///
/// ```
/// use fundus_traits::{Date, TickerSeries};
///
/// let dates = vec![
///     Date::from_ymd_opt(2021, 10, 1).unwrap(),
///     Date::from_ymd_opt(2021, 7, 1).unwrap(),
/// ];
/// let series = TickerSeries::new("AAPL", dates)
///     .unwrap()
///     .with_column("revenue", vec![120.0, 110.0])
///     .unwrap();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.column("revenue"), Some(&[120.0, 110.0][..]));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSeries {
    ticker: Ticker,
    dates: Vec<Date>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl TickerSeries {
    /// Creates a series with the given row dates and no columns.
    ///
    /// # Errors
    ///
    /// Returns [`FundusError::InvalidData`] if `dates` is not strictly
    /// descending.
    pub fn new(ticker: impl Into<Ticker>, dates: Vec<Date>) -> Result<Self> {
        let ticker = ticker.into();
        if let Some(pos) = dates.windows(2).position(|w| w[0] <= w[1]) {
            return Err(FundusError::InvalidData(format!(
                "{ticker}: dates must be strictly descending, found {} before {}",
                dates[pos],
                dates[pos + 1]
            )));
        }

        Ok(Self {
            ticker,
            dates,
            columns: BTreeMap::new(),
        })
    }

    /// Adds (or replaces) a numeric column.
    ///
    /// # Errors
    ///
    /// Returns [`FundusError::ShapeMismatch`] if `values` does not have one
    /// entry per row.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.len() != self.dates.len() {
            return Err(FundusError::ShapeMismatch {
                expected: format!("{} values for column '{name}'", self.dates.len()),
                actual: values.len().to_string(),
            });
        }
        self.columns.insert(name, values);
        Ok(self)
    }

    /// The company this series belongs to.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Number of rows.
    pub const fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the series has no rows.
    pub const fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Row dates, newest first.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the values of a column, newest first.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Like [`Self::column`] but reports a missing column as an error.
    ///
    /// # Errors
    ///
    /// Returns [`FundusError::MissingColumn`] if the column is absent.
    pub fn require_column(&self, name: &str) -> Result<&[f64]> {
        self.column(name)
            .ok_or_else(|| FundusError::MissingColumn(format!("{name} ({})", self.ticker)))
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Column names in lexical order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of leading rows dated on or after `date`.
    ///
    /// Because rows are newest-first, the rows strictly older than `date`
    /// are exactly `self.dates()[self.rows_on_or_after(date)..]`.
    pub fn rows_on_or_after(&self, date: Date) -> usize {
        self.dates.partition_point(|d| *d >= date)
    }
}

/// Flat feature output for one (ticker, as-of date) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Company the features were derived from.
    pub ticker: Ticker,
    /// As-of date of the quarter anchoring the record.
    pub date: Date,
    /// Feature name to value. Unresolvable statistics are `NaN`.
    pub features: BTreeMap<String, f64>,
}

impl FeatureRecord {
    /// Creates an empty record.
    pub fn new(ticker: impl Into<Ticker>, date: Date) -> Self {
        Self {
            ticker: ticker.into(),
            date,
            features: BTreeMap::new(),
        }
    }

    /// Inserts a feature value, replacing any previous value of that name.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.features.insert(name.into(), value);
    }

    /// Looks up a feature by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.features.get(name).copied()
    }

    /// Number of features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the record carries no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
