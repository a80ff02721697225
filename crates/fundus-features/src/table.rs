//! Conversion between polars tables and per-ticker series / feature records.
//!
//! Source tables hold many tickers in arbitrary row order. The extractors
//! need one newest-first [`TickerSeries`] per company, and their output is
//! flattened back into a single frame with one `f64` column per feature.

use std::collections::BTreeSet;

use fundus_traits::{Date, FeatureRecord, FundusError, Result, TickerSeries};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Company identifier column.
pub const TICKER_COLUMN: &str = "ticker";

/// Row date column.
pub const DATE_COLUMN: &str = "date";

/// Reporting dimension column of quarterly fundamentals.
pub const DIMENSION_COLUMN: &str = "dimension";

/// Days from 0001-01-01 to 1970-01-01, the epoch of polars `Date` values.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Row selection applied while splitting a table into series.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Keep only rows whose `dimension` equals this value (e.g. `"ARQ"`)
    pub dimension: Option<String>,

    /// Keep at most this many of the newest rows per ticker
    pub max_rows: Option<usize>,
}

/// Splits a multi-ticker table into newest-first series, one per ticker.
///
/// Tickers come out in lexical order. The named `columns` are cast to `f64`
/// with nulls mapped to NaN.
///
/// # Errors
///
/// Returns [`FundusError::MissingColumn`] if `ticker`, `date`, any of
/// `columns` or (when filtering) `dimension` is absent, and
/// [`FundusError::InvalidData`] for null tickers and for null or duplicate
/// dates within a ticker.
pub fn series_from_frame(
    df: &DataFrame,
    columns: &[String],
    options: &TableOptions,
) -> Result<Vec<TickerSeries>> {
    for required in [TICKER_COLUMN, DATE_COLUMN] {
        require(df, required)?;
    }

    let mut frame = match &options.dimension {
        Some(dimension) => {
            let mask = require(df, DIMENSION_COLUMN)?
                .as_materialized_series()
                .str()?
                .equal(dimension.as_str());
            df.filter(&mask)?
        }
        None => df.clone(),
    };

    let dates = frame.column(DATE_COLUMN)?.cast(&DataType::Date)?;
    frame.with_column(dates)?;

    let ticker_values = frame.column(TICKER_COLUMN)?.as_materialized_series().str()?;
    let null_tickers = ticker_values.null_count();
    if null_tickers > 0 {
        return Err(FundusError::InvalidData(format!(
            "{null_tickers} rows with a null ticker"
        )));
    }

    let mut tickers: Vec<String> = ticker_values
        .unique()?
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    tickers.sort();

    tickers
        .iter()
        .map(|ticker| ticker_series(&frame, ticker, columns, options.max_rows))
        .collect()
}

fn ticker_series(
    frame: &DataFrame,
    ticker: &str,
    columns: &[String],
    max_rows: Option<usize>,
) -> Result<TickerSeries> {
    let mask = frame
        .column(TICKER_COLUMN)?
        .as_materialized_series()
        .str()?
        .equal(ticker);

    let rows = frame.filter(&mask)?.sort(
        [DATE_COLUMN],
        SortMultipleOptions::default().with_order_descending(true),
    )?;
    let rows = match max_rows {
        Some(n) => rows.head(Some(n)),
        None => rows,
    };

    let dates = rows
        .column(DATE_COLUMN)?
        .as_materialized_series()
        .date()?
        .into_iter()
        .map(|d: Option<i32>| {
            d.and_then(|d| Date::from_num_days_from_ce_opt(d + EPOCH_DAYS_FROM_CE))
                .ok_or_else(|| FundusError::InvalidData(format!("{ticker}: null or invalid date")))
        })
        .collect::<Result<Vec<Date>>>()?;

    let mut series = TickerSeries::new(ticker, dates)?;
    for name in columns {
        let values: Vec<f64> = require(&rows, name)?
            .cast(&DataType::Float64)?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        series = series.with_column(name.as_str(), values)?;
    }

    Ok(series)
}

fn require<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| FundusError::MissingColumn(name.to_string()))
}

/// Flattens feature records into a frame with `ticker`, `date` and one `f64`
/// column per feature name seen in any record.
///
/// Features absent from a record are NaN in its row.
///
/// # Errors
///
/// Propagates polars construction errors.
pub fn records_to_frame(records: &[FeatureRecord]) -> Result<DataFrame> {
    let names: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.features.keys().map(String::as_str))
        .collect();

    let tickers: Vec<&str> = records.iter().map(|r| r.ticker.as_str()).collect();
    let dates: Vec<Date> = records.iter().map(|r| r.date).collect();

    let mut columns = Vec::with_capacity(names.len() + 2);
    columns.push(Series::new(TICKER_COLUMN.into(), tickers).into_column());
    columns.push(Series::new(DATE_COLUMN.into(), dates).into_column());
    for name in names {
        let values: Vec<f64> = records
            .iter()
            .map(|r| r.get(name).unwrap_or(f64::NAN))
            .collect();
        columns.push(Series::new(name.into(), values).into_column());
    }

    Ok(DataFrame::new(columns)?)
}
