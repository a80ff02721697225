//! Feature extraction command implementation.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use fundus_features::table::{DATE_COLUMN, TICKER_COLUMN};
use fundus_features::{
    DailyFeatureExtractor, FeatureConfig, QuarterlyFeatureExtractor, TableOptions,
    records_to_frame, series_from_frame,
};
use fundus_traits::{FeatureRecord, TickerSeries};
use polars::prelude::*;
use rayon::prelude::*;
use tracing::info;

use crate::data;

/// Extract features from CSV inputs and write the merged table.
pub(crate) fn extract_features(
    quarterly_path: &Path,
    daily_path: Option<&Path>,
    output: &Path,
    options: &TableOptions,
    config: &FeatureConfig,
) -> Result<()> {
    let quarterly = data::read_csv(quarterly_path)?;
    let daily = daily_path.map(data::read_csv).transpose()?;

    println!(
        "Loaded {} quarterly rows{}",
        quarterly.height(),
        daily
            .as_ref()
            .map(|d| format!(" and {} daily rows", d.height()))
            .unwrap_or_default()
    );

    let mut table = build_feature_table(&quarterly, daily.as_ref(), config, options)?;
    data::write_csv(&mut table, output)?;

    println!(
        "Wrote {} rows x {} columns to {}",
        table.height(),
        table.width(),
        output.display()
    );
    Ok(())
}

/// Runs both extractors per ticker in parallel and left-joins the daily
/// features onto the quarterly ones by `(ticker, date)`.
pub(crate) fn build_feature_table(
    quarterly: &DataFrame,
    daily: Option<&DataFrame>,
    config: &FeatureConfig,
    options: &TableOptions,
) -> fundus_traits::Result<DataFrame> {
    let quarterly_series = series_from_frame(quarterly, &config.quarter_columns, options)?;
    let daily_series: HashMap<String, TickerSeries> = match daily {
        Some(df) => series_from_frame(df, &config.daily_columns, &TableOptions::default())?
            .into_iter()
            .map(|s| (s.ticker().to_string(), s))
            .collect(),
        None => HashMap::new(),
    };

    let quarter_extractor = QuarterlyFeatureExtractor::new(config.clone());
    let daily_extractor = DailyFeatureExtractor::new(config.clone());

    let per_ticker = quarterly_series
        .par_iter()
        .map(|series| {
            let quarter = quarter_extractor.extract(series)?;
            let daily_rows = match daily_series.get(series.ticker()) {
                Some(d) => daily_extractor.extract(series, d)?,
                None => Vec::new(),
            };
            Ok((quarter, daily_rows))
        })
        .collect::<fundus_traits::Result<Vec<(Vec<FeatureRecord>, Vec<FeatureRecord>)>>>()?;

    let (quarter_records, daily_records): (Vec<_>, Vec<_>) = per_ticker.into_iter().unzip();
    let quarter_records: Vec<FeatureRecord> = quarter_records.into_iter().flatten().collect();
    let daily_records: Vec<FeatureRecord> = daily_records.into_iter().flatten().collect();

    info!(
        tickers = quarterly_series.len(),
        quarter_records = quarter_records.len(),
        daily_records = daily_records.len(),
        "extracted features"
    );

    let quarter_frame = records_to_frame(&quarter_records)?;
    if daily.is_none() {
        return Ok(quarter_frame);
    }

    let keys = [col(TICKER_COLUMN), col(DATE_COLUMN)];
    let merged = quarter_frame
        .lazy()
        .join(
            records_to_frame(&daily_records)?.lazy(),
            keys.clone(),
            keys,
            JoinArgs::new(JoinType::Left),
        )
        .collect()?;

    Ok(merged)
}
