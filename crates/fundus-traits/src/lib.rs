#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fundus/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the fundus fundamentals pipeline.
//!
//! This crate provides the building blocks shared by feature extraction and
//! model fitting: per-ticker time series, flat feature records, robust
//! distributional statistics and the [`Estimator`] abstraction that base
//! models implement.

/// The version of the fundus-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod estimator;
pub mod stats;
pub mod types;

// Re-exports
pub use error::{FundusError, Result};
pub use estimator::{Estimator, OutputKind};
pub use stats::SeriesStats;
pub use types::{Date, FeatureRecord, Ticker, TickerSeries};
