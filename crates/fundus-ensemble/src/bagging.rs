//! Bootstrap-aggregated ensembles over heterogeneous base models.

use std::sync::Arc;

use fundus_traits::{Estimator, FundusError, Result};
use ndarray::{Array1, Array2, Axis};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::EnsembleConfig;
use crate::registry::PrototypeRegistry;

/// An untrained bagging ensemble: a prototype registry plus configuration.
///
/// [`BaggingEnsemble::fit`] runs `models_cnt` independent bootstrap rounds.
/// Each round draws `floor(rows * bagging_fraction)` row indices with
/// replacement, picks one prototype uniformly at random, clones it and fits
/// the clone on the resampled rows. Round `i` draws from its own generator
/// seeded with `seed + i`, so the fitted ensemble does not depend on the
/// order in which rounds execute.
///
/// # Example
///
/// ```
/// use fundus_ensemble::{BaggingEnsemble, EnsembleConfig, PrototypeRegistry, RidgeRegressor};
/// use ndarray::{Array1, Array2};
///
/// let registry = PrototypeRegistry::new().with(RidgeRegressor::default());
/// let config = EnsembleConfig {
///     models_cnt: 5,
///     seed: Some(42),
///     ..Default::default()
/// };
/// let ensemble = BaggingEnsemble::new(registry, config).unwrap();
///
/// let x = Array2::from_shape_fn((20, 2), |(i, j)| (i * (j + 1)) as f64);
/// let y = Array1::from_shape_fn(20, |i| i as f64);
/// let trained = ensemble.fit(&x, &y).unwrap();
///
/// assert_eq!(trained.predict(&x).unwrap().len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct BaggingEnsemble {
    registry: Arc<PrototypeRegistry>,
    config: EnsembleConfig,
}

impl BaggingEnsemble {
    /// Creates an ensemble over the given prototypes.
    ///
    /// # Errors
    ///
    /// Returns [`FundusError::InvalidConfig`] if the registry is empty or the
    /// configuration is out of range.
    pub fn new(
        registry: impl Into<Arc<PrototypeRegistry>>,
        config: EnsembleConfig,
    ) -> Result<Self> {
        let registry = registry.into();
        if registry.is_empty() {
            return Err(FundusError::InvalidConfig(
                "prototype registry is empty".to_string(),
            ));
        }
        config.validate()?;

        Ok(Self { registry, config })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// The shared prototype registry.
    #[must_use]
    pub fn registry(&self) -> &PrototypeRegistry {
        &self.registry
    }

    /// Runs every bootstrap round and returns the fitted ensemble.
    ///
    /// # Errors
    ///
    /// Returns an error if `x` and `y` disagree in length, the bootstrap
    /// sample would be empty, or any member fails to fit.
    pub fn fit(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<TrainedEnsemble> {
        if x.nrows() != y.len() {
            return Err(FundusError::ShapeMismatch {
                expected: format!("{} targets", x.nrows()),
                actual: format!("{} targets", y.len()),
            });
        }

        let sample_size = self.config.sample_size(x.nrows());
        if sample_size == 0 {
            return Err(FundusError::InsufficientData(format!(
                "{} rows at bagging fraction {} leave no bootstrap sample",
                x.nrows(),
                self.config.bagging_fraction
            )));
        }

        let base_seed = self.config.seed.unwrap_or_else(rand::random);

        let members = (0..self.config.models_cnt)
            .into_par_iter()
            .map(|round| self.fit_round(round, base_seed, sample_size, x, y))
            .collect::<Result<Vec<_>>>()?;

        info!(
            rounds = members.len(),
            rows = x.nrows(),
            sample_size,
            prototypes = self.registry.len(),
            "fitted bagging ensemble"
        );

        Ok(TrainedEnsemble {
            members,
            n_features: x.ncols(),
        })
    }

    fn fit_round(
        &self,
        round: usize,
        base_seed: u64,
        sample_size: usize,
        x: &Array2<f64>,
        y: &Array1<f64>,
    ) -> Result<Box<dyn Estimator>> {
        let mut rng = ChaCha8Rng::seed_from_u64(base_seed.wrapping_add(round as u64));

        let rows = x.nrows();
        let indices: Vec<usize> = (0..sample_size).map(|_| rng.gen_range(0..rows)).collect();
        let choice = rng.gen_range(0..self.registry.len());

        let mut member = self.registry.instantiate(choice).ok_or_else(|| {
            FundusError::Other(format!("prototype {choice} vanished from registry"))
        })?;

        member.fit(&x.select(Axis(0), &indices), &y.select(Axis(0), &indices))?;
        debug!(round, prototype = member.name(), "fitted bootstrap member");

        Ok(member)
    }
}

/// A fitted bagging ensemble that owns its members.
#[derive(Debug, Clone)]
pub struct TrainedEnsemble {
    members: Vec<Box<dyn Estimator>>,
    n_features: usize,
}

impl TrainedEnsemble {
    /// Averages member outputs row-wise.
    ///
    /// Each member contributes its positive-class probability if it declares
    /// [`OutputKind::PositiveProbability`](fundus_traits::OutputKind), and
    /// its point prediction otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`FundusError::ShapeMismatch`] if `x` has a different feature
    /// count than the training data, and propagates member errors, including
    /// [`FundusError::UnsupportedOutput`] from a member that does not honour
    /// its declared convention.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if x.ncols() != self.n_features {
            return Err(FundusError::ShapeMismatch {
                expected: format!("{} feature columns", self.n_features),
                actual: format!("{} feature columns", x.ncols()),
            });
        }

        let outputs = self
            .members
            .par_iter()
            .map(|member| member.predict_declared(x))
            .collect::<Result<Vec<_>>>()?;

        let mut total = Array1::<f64>::zeros(x.nrows());
        for (member, output) in self.members.iter().zip(&outputs) {
            if output.len() != x.nrows() {
                return Err(FundusError::ShapeMismatch {
                    expected: format!("{} predictions", x.nrows()),
                    actual: format!("{} from {}", output.len(), member.name()),
                });
            }
            total += output;
        }

        Ok(total / self.members.len() as f64)
    }

    /// Number of fitted members (`models_cnt`).
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false for an ensemble produced by [`BaggingEnsemble::fit`].
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Feature count the members were trained on.
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Fitted members in round order.
    pub fn members(&self) -> impl Iterator<Item = &dyn Estimator> {
        self.members.iter().map(|m| m.as_ref())
    }
}
