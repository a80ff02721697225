//! Log-space regression adapter.

use fundus_traits::{Estimator, OutputKind, Result};
use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use crate::linear::check_training_shape;

/// Fits a base regressor on `ln(y)` and predicts `exp` of its output.
///
/// Rows whose target is not strictly positive (including NaN) cannot be
/// represented in log space and are excluded from the fit. The count of
/// excluded rows from the most recent fit is available through
/// [`LogExpAdapter::excluded_rows`] and is logged at debug level.
///
/// # Example
///
/// ```
/// use fundus_ensemble::{LogExpAdapter, RidgeRegressor};
/// use fundus_traits::Estimator;
/// use ndarray::array;
///
/// let mut model = LogExpAdapter::new(RidgeRegressor::new(1e-9));
/// let x = array![[0.0], [1.0], [2.0], [3.0]];
/// model.fit(&x, &array![-1.0, 2.0, 4.0, 8.0]).unwrap();
///
/// assert_eq!(model.excluded_rows(), 1);
/// let preds = model.predict(&array![[4.0]]).unwrap();
/// assert!((preds[0] - 16.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct LogExpAdapter {
    base: Box<dyn Estimator>,
    name: String,
    excluded_rows: usize,
}

impl LogExpAdapter {
    /// Wraps `base`.
    #[must_use]
    pub fn new(base: impl Estimator + 'static) -> Self {
        Self::from_boxed(Box::new(base))
    }

    /// Wraps an already boxed estimator.
    #[must_use]
    pub fn from_boxed(base: Box<dyn Estimator>) -> Self {
        let name = format!("log_exp({})", base.name());
        Self {
            base,
            name,
            excluded_rows: 0,
        }
    }

    /// The wrapped estimator.
    pub fn base(&self) -> &dyn Estimator {
        self.base.as_ref()
    }

    /// Rows dropped by the last [`Estimator::fit`] for non-positive targets.
    #[must_use]
    pub const fn excluded_rows(&self) -> usize {
        self.excluded_rows
    }
}

impl Estimator for LogExpAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn output_kind(&self) -> OutputKind {
        OutputKind::PointEstimate
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_training_shape(x, y)?;

        let keep: Vec<usize> = y
            .iter()
            .enumerate()
            .filter(|(_, v)| **v > 0.0)
            .map(|(i, _)| i)
            .collect();

        self.excluded_rows = y.len() - keep.len();
        if self.excluded_rows > 0 {
            debug!(
                model = self.base.name(),
                excluded = self.excluded_rows,
                kept = keep.len(),
                "excluded non-positive targets from log-space fit"
            );
        }

        let x_pos = x.select(Axis(0), &keep);
        let y_log: Array1<f64> = keep.iter().map(|&i| y[i].ln()).collect();
        self.base.fit(&x_pos, &y_log)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        Ok(self.base.predict(x)?.mapv(f64::exp))
    }

    fn clone_box(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }
}
