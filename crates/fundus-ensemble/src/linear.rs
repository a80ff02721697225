//! Closed-form ridge regression.

use fundus_traits::{Estimator, FundusError, OutputKind, Result, SeriesStats};
use ndarray::{Array1, Array2, Axis};

/// L2-regularised least squares with an intercept.
///
/// Missing features are imputed with the training column means, which keeps
/// sparse feature tables usable without a separate preprocessing step.
#[derive(Debug, Clone)]
pub struct RidgeRegressor {
    alpha: f64,
    fitted: Option<RidgeFit>,
}

#[derive(Debug, Clone)]
struct RidgeFit {
    fill: Array1<f64>,
    coefficients: Array1<f64>,
    intercept: f64,
}

impl RidgeRegressor {
    /// Create a regressor with regularisation strength `alpha`.
    #[must_use]
    pub const fn new(alpha: f64) -> Self {
        Self {
            alpha,
            fitted: None,
        }
    }

    /// Regularisation strength.
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fitted coefficients, one per feature.
    pub fn coefficients(&self) -> Option<&Array1<f64>> {
        self.fitted.as_ref().map(|f| &f.coefficients)
    }

    /// Fitted intercept.
    pub fn intercept(&self) -> Option<f64> {
        self.fitted.as_ref().map(|f| f.intercept)
    }
}

impl Default for RidgeRegressor {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Estimator for RidgeRegressor {
    fn name(&self) -> &str {
        "ridge"
    }

    fn output_kind(&self) -> OutputKind {
        OutputKind::PointEstimate
    }

    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_training_shape(x, y)?;
        if self.alpha <= 0.0 {
            return Err(FundusError::InvalidConfig(format!(
                "ridge alpha must be positive, got {}",
                self.alpha
            )));
        }

        let fill = column_fill_values(x);
        let x = impute(x, &fill);

        let x_mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| FundusError::InsufficientData("no training rows".to_string()))?;
        let y_mean = y.mean().unwrap_or(0.0);
        let x_c = &x - &x_mean.view().insert_axis(Axis(0));
        let y_c = y - y_mean;

        let mut gram = x_c.t().dot(&x_c);
        for i in 0..gram.nrows() {
            gram[[i, i]] += self.alpha;
        }
        let moment = x_c.t().dot(&y_c);

        let coefficients = cholesky_solve(&gram, &moment).ok_or_else(|| {
            FundusError::Computation("ridge normal equations are not positive definite".to_string())
        })?;
        let intercept = y_mean - coefficients.dot(&x_mean);

        self.fitted = Some(RidgeFit {
            fill,
            coefficients,
            intercept,
        });
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let fit = self
            .fitted
            .as_ref()
            .ok_or_else(|| FundusError::NotFitted(self.name().to_string()))?;
        check_width(x, fit.coefficients.len())?;

        Ok(impute(x, &fit.fill).dot(&fit.coefficients) + fit.intercept)
    }

    fn clone_box(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }
}

/// Rejects empty or misaligned training data.
pub(crate) fn check_training_shape(x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(FundusError::ShapeMismatch {
            expected: format!("{} targets", x.nrows()),
            actual: format!("{} targets", y.len()),
        });
    }
    if x.nrows() == 0 {
        return Err(FundusError::InsufficientData("no training rows".to_string()));
    }
    Ok(())
}

pub(crate) fn check_width(x: &Array2<f64>, features: usize) -> Result<()> {
    if x.ncols() != features {
        return Err(FundusError::ShapeMismatch {
            expected: format!("{features} feature columns"),
            actual: format!("{} feature columns", x.ncols()),
        });
    }
    Ok(())
}

/// Per-column mean of the non-NaN entries; 0 for all-missing columns.
pub(crate) fn column_fill_values(x: &Array2<f64>) -> Array1<f64> {
    x.columns()
        .into_iter()
        .map(|column| {
            let mean = SeriesStats::compute(&column.to_vec()).mean;
            if mean.is_finite() { mean } else { 0.0 }
        })
        .collect()
}

/// Replaces non-finite entries with the matching fill value.
pub(crate) fn impute(x: &Array2<f64>, fill: &Array1<f64>) -> Array2<f64> {
    let mut out = x.clone();
    for (mut column, &value) in out.columns_mut().into_iter().zip(fill.iter()) {
        column.mapv_inplace(|v| if v.is_finite() { v } else { value });
    }
    out
}

/// Solves `a * x = b` for symmetric positive definite `a`.
fn cholesky_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    let mut l = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let sum: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();
            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= 0.0 || !diag.is_finite() {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    // L * z = b
    let mut z = Array1::<f64>::zeros(n);
    for i in 0..n {
        let sum: f64 = (0..i).map(|j| l[[i, j]] * z[j]).sum();
        z[i] = (b[i] - sum) / l[[i, i]];
    }

    // L^T * x = z
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let sum: f64 = ((i + 1)..n).map(|j| l[[j, i]] * x[j]).sum();
        x[i] = (z[i] - sum) / l[[i, i]];
    }

    Some(x)
}
