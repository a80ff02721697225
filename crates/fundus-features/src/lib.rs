//! Windowed feature extraction for point-in-time fundamentals.
//!
//! This crate turns a company's quarterly fundamentals and daily market data
//! into flat feature records, one per historical as-of quarter:
//! - [`QuarterlyFeatureExtractor`]: statistics over trailing quarterly windows
//! - [`DailyFeatureExtractor`]: statistics over the daily rows strictly
//!   preceding each quarterly anchor
//!
//! Both extractors are pure and can run in parallel across tickers. Their
//! outputs share `(ticker, date)` keys and are merged by the caller.
//!
//! # Example
//!
//! ```ignore
//! use fundus_features::{FeatureConfig, QuarterlyFeatureExtractor, series_from_frame};
//!
//! let config = FeatureConfig::default();
//! let series = series_from_frame(&df, &config.quarter_columns, &Default::default())?;
//! let extractor = QuarterlyFeatureExtractor::new(config);
//! let records = extractor.extract(&series[0])?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod daily;
pub mod quarterly;
pub mod registry;
pub mod table;
mod window;

// Re-export key types
pub use config::{FeatureConfig, Window};
pub use daily::DailyFeatureExtractor;
pub use quarterly::QuarterlyFeatureExtractor;
pub use registry::{Cadence, ColumnCategory, ColumnInfo};
pub use table::{TableOptions, records_to_frame, series_from_frame};
pub use window::feature_name;
