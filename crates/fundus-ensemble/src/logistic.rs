//! Binary logistic regression.

use fundus_traits::{Estimator, FundusError, OutputKind, Result};
use ndarray::{Array1, Array2, Axis};

use crate::linear::{check_training_shape, check_width, column_fill_values, impute};

/// L2-regularised logistic regression fitted by gradient descent.
///
/// Targets above 0.5 are treated as the positive class. Features are
/// standardised with training statistics before fitting.
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    alpha: f64,
    learning_rate: f64,
    max_iter: usize,
    tol: f64,
    fitted: Option<LogisticFit>,
}

#[derive(Debug, Clone)]
struct LogisticFit {
    fill: Array1<f64>,
    mean: Array1<f64>,
    scale: Array1<f64>,
    weights: Array1<f64>,
    bias: f64,
}

impl Default for LogisticClassifier {
    fn default() -> Self {
        Self {
            alpha: 0.01,
            learning_rate: 0.1,
            max_iter: 1000,
            tol: 1e-6,
            fitted: None,
        }
    }
}

impl LogisticClassifier {
    /// Set regularization strength
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set learning rate
    #[must_use]
    pub const fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Set maximum iterations
    #[must_use]
    pub const fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
        z.mapv(|v| 1.0 / (1.0 + (-v).exp()))
    }

    fn standardise(x: &Array2<f64>, fit: &LogisticFit) -> Array2<f64> {
        (impute(x, &fit.fill) - &fit.mean.view().insert_axis(Axis(0)))
            / &fit.scale.view().insert_axis(Axis(0))
    }
}

impl Estimator for LogisticClassifier {
    fn name(&self) -> &str {
        "logistic"
    }

    fn output_kind(&self) -> OutputKind {
        OutputKind::PositiveProbability
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_training_shape(x, y)?;

        let fill = column_fill_values(x);
        let imputed = impute(x, &fill);
        let mean = imputed
            .mean_axis(Axis(0))
            .ok_or_else(|| FundusError::InsufficientData("no training rows".to_string()))?;
        let scale = imputed
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s > 1e-12 { s } else { 1.0 });

        let mut fit = LogisticFit {
            fill,
            mean,
            scale,
            weights: Array1::zeros(x.ncols()),
            bias: 0.0,
        };
        let xs = Self::standardise(x, &fit);
        let labels = y.mapv(|v| if v > 0.5 { 1.0 } else { 0.0 });
        let n = xs.nrows() as f64;

        for _ in 0..self.max_iter {
            let probabilities = Self::sigmoid(&(xs.dot(&fit.weights) + fit.bias));
            let errors = &probabilities - &labels;

            let dw = xs.t().dot(&errors) / n + &fit.weights * self.alpha;
            let db = errors.mean().unwrap_or(0.0);

            let grad_norm = (dw.mapv(|v| v * v).sum() + db * db).sqrt();
            if grad_norm < self.tol {
                break;
            }

            fit.weights = &fit.weights - &(dw * self.learning_rate);
            fit.bias -= self.learning_rate * db;
        }

        self.fitted = Some(fit);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let proba = self.predict_positive_proba(x)?;
        Ok(proba.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }

    fn predict_positive_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let fit = self
            .fitted
            .as_ref()
            .ok_or_else(|| FundusError::NotFitted(self.name().to_string()))?;
        check_width(x, fit.weights.len())?;

        let xs = Self::standardise(x, fit);
        Ok(Self::sigmoid(&(xs.dot(&fit.weights) + fit.bias)))
    }

    fn clone_box(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }
}
