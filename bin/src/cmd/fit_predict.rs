//! Ensemble fit-and-predict command implementation.

use std::path::Path;

use anyhow::Result;
use fundus_ensemble::{BaggingEnsemble, DesignMatrix, EnsembleConfig};
use polars::prelude::*;
use tracing::info;

use crate::{data, models};

/// Name of the appended prediction column.
pub(crate) const PREDICTION_COLUMN: &str = "prediction";

/// Fit an ensemble on a labelled table and score another table.
pub(crate) fn fit_predict(
    train_path: &Path,
    target: &str,
    input_path: &Path,
    output: &Path,
    model_names: &[String],
    log_target: bool,
    config: &EnsembleConfig,
) -> Result<()> {
    let train = data::read_csv(train_path)?;
    let input = data::read_csv(input_path)?;

    println!("Models: {} (log target: {log_target})", model_names.join(", "));
    println!("Training rows: {}  Scoring rows: {}", train.height(), input.height());

    let mut scored = score_frame(&train, target, &input, model_names, log_target, config)?;
    data::write_csv(&mut scored, output)?;

    println!("Wrote predictions to {}", output.display());
    Ok(())
}

/// Fits on `train` and returns `input` with a [`PREDICTION_COLUMN`] appended.
pub(crate) fn score_frame(
    train: &DataFrame,
    target: &str,
    input: &DataFrame,
    model_names: &[String],
    log_target: bool,
    config: &EnsembleConfig,
) -> fundus_traits::Result<DataFrame> {
    let (x, y) = DesignMatrix::training_set(train, target)?;
    info!(
        rows = x.nrows(),
        features = x.features().len(),
        target,
        "prepared training set"
    );

    let registry = models::build_registry(model_names, log_target)?;
    let trained = BaggingEnsemble::new(registry, config.clone())?.fit(x.values(), &y)?;

    let scoring = DesignMatrix::from_frame(input, x.features())?;
    let predictions = trained.predict(scoring.values())?;

    let mut scored = input.clone();
    scored.with_column(Series::new(PREDICTION_COLUMN.into(), predictions.to_vec()))?;
    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use fundus_traits::FundusError;

    fn train() -> DataFrame {
        let a: Vec<f64> = (0..30).map(|i| (i % 10) as f64).collect();
        let b: Vec<f64> = (0..30).map(|i| ((i * 3) % 7) as f64).collect();
        let target: Vec<f64> = a.iter().zip(&b).map(|(a, b)| 1.0 + 2.0 * a + 0.5 * b).collect();
        df! {
            "ticker" => vec!["AAPL"; 30],
            "feat_a" => a,
            "feat_b" => b,
            "target" => target,
        }
        .unwrap()
    }

    fn config() -> EnsembleConfig {
        EnsembleConfig {
            models_cnt: 8,
            seed: Some(21),
            ..Default::default()
        }
    }

    #[test]
    fn test_predictions_appended() {
        let input = df! {
            "ticker" => &["MSFT", "MSFT"],
            "feat_b" => &[1.0, 2.0],
            "feat_a" => &[3.0, 4.0],
        }
        .unwrap();

        let scored =
            score_frame(&train(), "target", &input, &["ridge_weak".to_string()], false, &config())
                .unwrap();

        assert_eq!(scored.width(), 4);
        let predictions = scored
            .column(PREDICTION_COLUMN)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .clone();
        assert_relative_eq!(predictions.get(0).unwrap(), 7.5, epsilon = 0.05);
        assert_relative_eq!(predictions.get(1).unwrap(), 10.0, epsilon = 0.05);
    }

    #[test]
    fn test_log_target_and_classifier_mix() {
        let names = vec!["ridge".to_string(), "logistic".to_string()];
        let scored = score_frame(&train(), "target", &train(), &names, true, &config()).unwrap();
        assert_eq!(scored.height(), 30);

        let predictions = scored.column(PREDICTION_COLUMN).unwrap();
        assert_eq!(predictions.null_count(), 0);
    }

    #[test]
    fn test_scoring_needs_training_features() {
        let input = df! { "feat_a" => &[1.0] }.unwrap();
        let result = score_frame(&train(), "target", &input, &["ridge".to_string()], false, &config());
        assert!(matches!(result, Err(FundusError::MissingColumn(_))));
    }
}
