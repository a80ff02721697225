//! Read-only catalogue of untrained base-model prototypes.

use fundus_traits::Estimator;

/// Prototypes a [`BaggingEnsemble`](crate::BaggingEnsemble) draws from.
///
/// The registry is never mutated by an ensemble. Every bootstrap round calls
/// [`PrototypeRegistry::instantiate`] to obtain its own copy and fits that.
///
/// # Example
///
/// ```
/// use fundus_ensemble::{PrototypeRegistry, RidgeRegressor};
///
/// let registry = PrototypeRegistry::new()
///     .with(RidgeRegressor::default())
///     .with(RidgeRegressor::new(10.0));
/// assert_eq!(registry.names(), vec!["ridge", "ridge"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PrototypeRegistry {
    prototypes: Vec<Box<dyn Estimator>>,
}

impl PrototypeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prototypes: Vec::new(),
        }
    }

    /// Builder-style [`Self::register`].
    #[must_use]
    pub fn with(mut self, prototype: impl Estimator + 'static) -> Self {
        self.register(Box::new(prototype));
        self
    }

    /// Adds a prototype.
    pub fn register(&mut self, prototype: Box<dyn Estimator>) {
        self.prototypes.push(prototype);
    }

    /// Number of prototypes.
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    /// Whether the registry holds no prototypes.
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }

    /// Prototype names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.prototypes.iter().map(|p| p.name()).collect()
    }

    /// Borrows a prototype.
    pub fn get(&self, index: usize) -> Option<&dyn Estimator> {
        self.prototypes.get(index).map(|p| p.as_ref())
    }

    /// Clones prototype `index` into a new, independently owned estimator.
    pub fn instantiate(&self, index: usize) -> Option<Box<dyn Estimator>> {
        self.prototypes.get(index).map(|p| p.clone_box())
    }
}

impl FromIterator<Box<dyn Estimator>> for PrototypeRegistry {
    fn from_iter<I: IntoIterator<Item = Box<dyn Estimator>>>(iter: I) -> Self {
        Self {
            prototypes: iter.into_iter().collect(),
        }
    }
}
