//! Design matrices built from polars feature tables.

use fundus_traits::{FundusError, Result};
use ndarray::{Array1, Array2, Axis};
use polars::prelude::*;

/// A dense `f64` feature matrix with named columns.
///
/// Nulls become NaN; the estimators impute them at fit time.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    features: Vec<String>,
    values: Array2<f64>,
}

impl DesignMatrix {
    /// Extracts the named `features` from `df`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`FundusError::MissingColumn`] if a feature is absent, and
    /// propagates polars cast errors for non-numeric columns.
    pub fn from_frame(df: &DataFrame, features: &[String]) -> Result<Self> {
        let columns = features
            .iter()
            .map(|name| float_column(df, name))
            .collect::<Result<Vec<_>>>()?;

        let values = Array2::from_shape_fn((df.height(), columns.len()), |(i, j)| columns[j][i]);

        Ok(Self {
            features: features.to_vec(),
            values,
        })
    }

    /// Splits a labelled table into a design matrix over every numeric column
    /// except `target`, and the target vector.
    ///
    /// Rows whose target is null or NaN are dropped. Non-numeric columns such
    /// as `ticker` and `date` never become features.
    ///
    /// # Errors
    ///
    /// Returns [`FundusError::MissingColumn`] if `target` is absent and
    /// [`FundusError::InsufficientData`] if no row has a usable target.
    pub fn training_set(df: &DataFrame, target: &str) -> Result<(Self, Array1<f64>)> {
        let y = float_column(df, target)?;
        let keep: Vec<usize> = y
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(i, _)| i)
            .collect();
        if keep.is_empty() {
            return Err(FundusError::InsufficientData(format!(
                "no rows with a value for target '{target}'"
            )));
        }

        let features = Self::feature_columns(df, &[target]);
        let full = Self::from_frame(df, &features)?;

        let y: Array1<f64> = keep.iter().map(|&i| y[i]).collect();
        let matrix = Self {
            features: full.features,
            values: full.values.select(Axis(0), &keep),
        };
        Ok((matrix, y))
    }

    /// Numeric columns of `df` not listed in `exclude`, in frame order.
    pub fn feature_columns(df: &DataFrame, exclude: &[&str]) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|c| c.dtype().is_primitive_numeric())
            .map(|c| c.name().to_string())
            .filter(|name| !exclude.contains(&name.as_str()))
            .collect()
    }

    /// Column names, aligned with the matrix columns.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// The matrix itself, one row per table row.
    pub const fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    /// Consumes the matrix, returning the raw values.
    pub fn into_values(self) -> Array2<f64> {
        self.values
    }
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df
        .column(name)
        .map_err(|_| FundusError::MissingColumn(name.to_string()))?;

    Ok(column
        .cast(&DataType::Float64)?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}
