//! Base-model creation utilities for the fundus CLI.

use fundus_ensemble::{LogExpAdapter, LogisticClassifier, PrototypeRegistry, RidgeRegressor};
use fundus_traits::{Estimator, FundusError, OutputKind};
use tracing::warn;

/// Create an untrained base model by name.
pub(crate) fn create_model(name: &str) -> Result<Box<dyn Estimator>, FundusError> {
    match name {
        "ridge" | "linear" => Ok(Box::new(RidgeRegressor::default())),
        "ridge_weak" => Ok(Box::new(RidgeRegressor::new(0.01))),
        "ridge_strong" => Ok(Box::new(RidgeRegressor::new(100.0))),
        "logistic" | "logit" => Ok(Box::new(LogisticClassifier::default())),
        _ => Err(FundusError::InvalidConfig(format!(
            "Unknown model: '{name}'. Available: {}",
            MODEL_NAMES.join(", ")
        ))),
    }
}

/// Canonical model names accepted by [`create_model`].
pub(crate) const MODEL_NAMES: [&str; 4] = ["ridge", "ridge_weak", "ridge_strong", "logistic"];

/// Build a prototype registry from model names.
///
/// With `log_target`, every point-estimate model is wrapped in a
/// [`LogExpAdapter`]; classifiers are registered unchanged.
pub(crate) fn build_registry(
    names: &[String],
    log_target: bool,
) -> Result<PrototypeRegistry, FundusError> {
    let mut registry = PrototypeRegistry::new();
    for name in names {
        let model = create_model(name.trim())?;
        let model: Box<dyn Estimator> = match (log_target, model.output_kind()) {
            (true, OutputKind::PointEstimate) => Box::new(LogExpAdapter::from_boxed(model)),
            (true, OutputKind::PositiveProbability) => {
                warn!(model = model.name(), "classifier not wrapped for log-space target");
                model
            }
            (false, _) => model,
        };
        registry.register(model);
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_models() {
        for name in MODEL_NAMES {
            assert!(create_model(name).is_ok(), "{name}");
        }

        // Aliases
        assert_eq!(create_model("linear").unwrap().name(), "ridge");
        assert_eq!(create_model("logit").unwrap().name(), "logistic");
    }

    #[test]
    fn test_unknown_model() {
        assert!(matches!(
            create_model("forest"),
            Err(FundusError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_log_target_wraps_regressors_only() {
        let names = vec!["ridge".to_string(), " logistic".to_string()];

        let plain = build_registry(&names, false).unwrap();
        assert_eq!(plain.names(), vec!["ridge", "logistic"]);

        let wrapped = build_registry(&names, true).unwrap();
        assert_eq!(wrapped.names(), vec!["log_exp(ridge)", "logistic"]);
    }
}
