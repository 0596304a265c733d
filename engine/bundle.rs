//! Trained model bundle and the shared slot it is installed into.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::classifier::SoftmaxClassifier;
use crate::cluster::KMeans;
use crate::regressor::LinearRegressor;
use crate::scaler::StandardScaler;

/// One complete, immutable trained ensemble.
///
/// Bundles are never mutated after training; retraining produces a fresh
/// bundle that replaces the previous one in a single swap.
#[derive(Debug)]
pub struct ModelBundle {
    /// Feature standardizer fitted over the training matrix.
    pub scaler: StandardScaler,
    /// Disease classifier.
    pub classifier: SoftmaxClassifier,
    /// Severity regressor.
    pub regressor: LinearRegressor,
    /// Symptom-pattern clusterer.
    pub clusterer: KMeans,
    /// Class index to disease name, in first-seen label order.
    pub disease_labels: Vec<String>,
    /// When training completed.
    pub trained_at: DateTime<Utc>,
}

/// Shared slot holding the currently installed bundle, if any.
///
/// Readers clone the `Arc` and keep predicting against a consistent
/// snapshot even while a retrain installs a replacement.
#[derive(Debug, Default)]
pub struct ModelState {
    slot: RwLock<Option<Arc<ModelBundle>>>,
}

impl ModelState {
    /// Empty state with no bundle installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current bundle.
    #[must_use]
    pub fn current(&self) -> Option<Arc<ModelBundle>> {
        self.slot.read().clone()
    }

    /// Atomically replaces the installed bundle.
    pub fn install(&self, bundle: ModelBundle) {
        *self.slot.write() = Some(Arc::new(bundle));
    }

    /// Whether any bundle is installed.
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Completion time of the installed bundle.
    #[must_use]
    pub fn last_trained(&self) -> Option<DateTime<Utc>> {
        self.slot.read().as_ref().map(|bundle| bundle.trained_at)
    }
}
