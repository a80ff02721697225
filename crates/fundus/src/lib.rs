#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fundus/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # fundus
//!
//! Point-in-time fundamental features and bagging ensembles.
//!
//! fundus is an umbrella crate that re-exports all fundus sub-crates for
//! convenience. It turns per-company quarterly fundamentals and daily market
//! data into a flat feature table, then fits an ensemble of heterogeneous
//! base models over it.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fundus::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = FeatureConfig::default();
//! let quarterly = series_from_frame(&fundamentals, &config.quarter_columns, &TableOptions::default())?;
//!
//! let extractor = QuarterlyFeatureExtractor::new(config);
//! let records = extractor.extract(&quarterly[0])?;
//! let table = records_to_frame(&records)?;
//!
//! let registry = PrototypeRegistry::new()
//!     .with(RidgeRegressor::default())
//!     .with(LogisticClassifier::default());
//! let ensemble = BaggingEnsemble::new(registry, EnsembleConfig::default())?;
//! let (x, y) = DesignMatrix::training_set(&labelled, "target")?;
//! let predictions = ensemble.fit(x.values(), &y)?.predict(x.values())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types, statistics and the [`Estimator`] trait
//! - [`features`] - Quarterly and daily window feature extraction
//! - [`ensemble`] - Bagging ensembles and base models
//!
//! ## Architecture
//!
//! 1. **Tables** are split into newest-first series, one per ticker
//! 2. **Extractors** emit one feature record per historical as-of quarter
//! 3. **Ensembles** fit bootstrap members drawn from a prototype registry
//!    and average their declared outputs

/// Version information for the fundus crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types and traits.
///
/// - [`Estimator`] - Base model interface with a declared [`OutputKind`]
/// - [`TickerSeries`] - One company's newest-first time series
/// - [`FeatureRecord`] - Flat features for one (ticker, date)
/// - [`SeriesStats`] - NaN-tolerant summary statistics
pub mod traits {
    pub use fundus_traits::*;
}

pub use fundus_traits::{
    Date, Estimator, FeatureRecord, FundusError, OutputKind, Result, SeriesStats, Ticker,
    TickerSeries,
};

// ============================================================================
// Feature Extraction
// ============================================================================

/// Windowed feature extraction.
///
/// Feature names follow `{quarter|daily}_{series|diffs}_{width}_{column}_{stat}`
/// where `stat` is one of `mean`, `median`, `max`, `min`, `std`.
///
/// # Example
///
/// ```ignore
/// use fundus::features::{FeatureConfig, QuarterlyFeatureExtractor};
///
/// let extractor = QuarterlyFeatureExtractor::new(FeatureConfig::default());
/// let records = extractor.extract(&series)?;
/// ```
pub mod features {
    pub use fundus_features::*;
}

pub use fundus_features::{
    DailyFeatureExtractor, FeatureConfig, QuarterlyFeatureExtractor, TableOptions,
    records_to_frame, series_from_frame,
};

// ============================================================================
// Ensembles
// ============================================================================

/// Bagging ensembles and base models.
///
/// ## Available Base Models
///
/// - **RidgeRegressor**: point estimates from L2 least squares
/// - **LogisticClassifier**: positive-class probabilities
/// - **LogExpAdapter**: wraps a regressor to fit `ln(y)`
pub mod ensemble {
    pub use fundus_ensemble::*;
}

pub use fundus_ensemble::{
    BaggingEnsemble, DesignMatrix, EnsembleConfig, LogExpAdapter, LogisticClassifier,
    PrototypeRegistry, RidgeRegressor, TrainedEnsemble,
};

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use fundus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BaggingEnsemble, DailyFeatureExtractor, Date, DesignMatrix, EnsembleConfig, Estimator,
        FeatureConfig, FeatureRecord, FundusError, LogExpAdapter, LogisticClassifier, OutputKind,
        PrototypeRegistry, QuarterlyFeatureExtractor, Result, RidgeRegressor, TableOptions,
        TickerSeries, TrainedEnsemble, records_to_frame, series_from_frame,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let _error: FundusError = FundusError::InvalidData("test".to_string());
    }

    #[test]
    fn test_features_feed_ensemble() {
        let quarters = 12;
        let start = Date::from_ymd_opt(2024, 1, 1).unwrap();
        let dates: Vec<Date> = (0..quarters)
            .map(|i| start - chrono::Days::new(91 * i as u64))
            .collect();
        let revenue: Vec<f64> = (0..quarters).map(|i| 100.0 - 3.0 * i as f64).collect();

        let series = TickerSeries::new("ACME", dates)
            .unwrap()
            .with_column("revenue", revenue)
            .unwrap();

        let config = FeatureConfig {
            quarter_columns: vec!["revenue".to_string()],
            ..Default::default()
        };
        let records = QuarterlyFeatureExtractor::new(config).extract(&series).unwrap();
        assert_eq!(records.len(), quarters as usize - 1);

        let name = "quarter_series_2_revenue_mean";
        let x = Array2::from_shape_fn((records.len(), 1), |(i, _)| {
            records[i].get(name).unwrap()
        });
        let y: Array1<f64> = records.iter().map(|r| r.get(name).unwrap() * 2.0).collect();

        let registry = PrototypeRegistry::new()
            .with(RidgeRegressor::new(1e-6))
            .with(LogExpAdapter::new(RidgeRegressor::new(1e-6)));
        let config = EnsembleConfig {
            models_cnt: 6,
            seed: Some(11),
            ..Default::default()
        };
        let trained = BaggingEnsemble::new(registry, config)
            .unwrap()
            .fit(&x, &y)
            .unwrap();

        let predictions = trained.predict(&x).unwrap();
        assert_eq!(predictions.len(), records.len());
        assert!(predictions.iter().all(|p| p.is_finite() && *p > 0.0));
    }
}
