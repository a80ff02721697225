//! Estimator trait for fittable base models.
//!
//! Base models declare their output convention upfront through
//! [`OutputKind`]. Ensembles dispatch on that tag instead of probing for a
//! probability method at run time.

use std::fmt::Debug;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::{FundusError, Result};

/// The prediction convention an estimator provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// A real-valued point prediction per row (regressors).
    PointEstimate,
    /// The probability of the positive class per row (binary classifiers).
    PositiveProbability,
}

/// A model that can be fitted on a feature matrix and predict per row.
///
/// Implementations must be cloneable through [`Estimator::clone_box`] so that
/// an untouched prototype can seed any number of independently owned fits.
///
/// # Example
///
/// ```
/// use fundus_traits::{Estimator, OutputKind, Result};
/// use ndarray::{Array1, Array2};
///
/// #[derive(Debug, Clone, Default)]
/// struct MeanModel {
///     mean: f64,
/// }
///
/// impl Estimator for MeanModel {
///     fn name(&self) -> &str {
///         "mean"
///     }
///
///     fn output_kind(&self) -> OutputKind {
///         OutputKind::PointEstimate
///     }
///
///     fn fit(&mut self, _x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
///         self.mean = y.mean().unwrap_or(0.0);
///         Ok(())
///     }
///
///     fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
///         Ok(Array1::from_elem(x.nrows(), self.mean))
///     }
///
///     fn clone_box(&self) -> Box<dyn Estimator> {
///         Box::new(self.clone())
///     }
/// }
/// ```
pub trait Estimator: Send + Sync + Debug {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// The output convention an ensemble should consume.
    fn output_kind(&self) -> OutputKind;

    /// Fits the model in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the shapes of `x` and `y` disagree or the model
    /// cannot be fitted on the given data.
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Point prediction for each row of `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or `x` has the wrong
    /// number of columns.
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Positive-class probability for each row of `x`.
    ///
    /// Only estimators declaring [`OutputKind::PositiveProbability`] need to
    /// override this.
    ///
    /// # Errors
    ///
    /// The default implementation returns [`FundusError::UnsupportedOutput`].
    fn predict_positive_proba(&self, _x: &Array2<f64>) -> Result<Array1<f64>> {
        Err(FundusError::UnsupportedOutput(format!(
            "{} does not provide class probabilities",
            self.name()
        )))
    }

    /// Predicts using the convention declared by [`Estimator::output_kind`].
    ///
    /// # Errors
    ///
    /// Propagates the error of the selected prediction method.
    fn predict_declared(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        match self.output_kind() {
            OutputKind::PointEstimate => self.predict(x),
            OutputKind::PositiveProbability => self.predict_positive_proba(x),
        }
    }

    /// Returns an independent copy of this estimator, fitted state included.
    fn clone_box(&self) -> Box<dyn Estimator>;
}

impl Clone for Box<dyn Estimator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
