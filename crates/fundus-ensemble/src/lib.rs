//! Bagging ensembles over heterogeneous base models.
//!
//! A [`BaggingEnsemble`] holds a read-only [`PrototypeRegistry`] of untrained
//! estimators. Fitting draws `models_cnt` bootstrap samples, clones a randomly
//! chosen prototype for each and fits it; prediction averages the members'
//! outputs, taking the positive-class probability from classifiers and the
//! point estimate from regressors.
//!
//! Base models shipped here:
//! - [`RidgeRegressor`]: closed-form L2 least squares
//! - [`LogisticClassifier`]: L2 logistic regression
//! - [`LogExpAdapter`]: fits any regressor in log space
//!
//! # Example
//!
//! ```
//! use fundus_ensemble::{
//!     BaggingEnsemble, EnsembleConfig, LogExpAdapter, LogisticClassifier, PrototypeRegistry,
//!     RidgeRegressor,
//! };
//! use ndarray::{Array1, Array2};
//!
//! let registry = PrototypeRegistry::new()
//!     .with(RidgeRegressor::default())
//!     .with(LogExpAdapter::new(RidgeRegressor::default()))
//!     .with(LogisticClassifier::default());
//!
//! let config = EnsembleConfig { seed: Some(7), ..Default::default() };
//! let ensemble = BaggingEnsemble::new(registry, config).unwrap();
//!
//! let x = Array2::from_shape_fn((50, 3), |(i, j)| ((i + j) % 7) as f64);
//! let y = Array1::from_shape_fn(50, |i| 1.0 + (i % 5) as f64);
//! let predictions = ensemble.fit(&x, &y).unwrap().predict(&x).unwrap();
//! assert_eq!(predictions.len(), 50);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod bagging;
pub mod config;
pub mod design;
pub mod linear;
pub mod log_exp;
pub mod logistic;
pub mod registry;

// Re-export key types
pub use bagging::{BaggingEnsemble, TrainedEnsemble};
pub use config::EnsembleConfig;
pub use design::DesignMatrix;
pub use linear::RidgeRegressor;
pub use log_exp::LogExpAdapter;
pub use logistic::LogisticClassifier;
pub use registry::PrototypeRegistry;
