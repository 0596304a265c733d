//! Fits the full ensemble over a training corpus.

use chrono::Utc;
use thiserror::Error;

use crate::bundle::ModelBundle;
use crate::classifier::SoftmaxClassifier;
use crate::cluster::KMeans;
use crate::corpus::TrainingSample;
use crate::regressor::LinearRegressor;
use crate::scaler::StandardScaler;
use triage_lexicon::VOCABULARY;

/// Minimum corpus size training will accept.
pub const MIN_CORPUS: usize = 5;

/// Fixed seed so identical corpora train identical bundles.
const TRAIN_SEED: u64 = 42;

const CLASSIFIER_LEARNING_RATE: f32 = 0.5;
const CLASSIFIER_EPOCHS: usize = 300;
const REGRESSOR_LEARNING_RATE: f32 = 0.01;
const REGRESSOR_EPOCHS: usize = 800;

/// Why training was refused or aborted.
#[derive(Debug, Error)]
pub enum TrainError {
    /// The corpus is below the minimum viable size.
    #[error("training corpus too small: need at least {needed} samples, got {actual}")]
    InsufficientCorpus {
        /// Minimum viable corpus size.
        needed: usize,
        /// Samples actually available.
        actual: usize,
    },
    /// The corpus itself is malformed.
    #[error("model fitting failed: {0}")]
    Fit(String),
}

/// Trains scaler, classifier, regressor, and clusterer over the corpus.
///
/// The cluster count is `samples / 5` clamped to `2..=8`. Labels are
/// indexed in first-seen order.
pub fn train(samples: &[TrainingSample]) -> Result<ModelBundle, TrainError> {
    if samples.len() < MIN_CORPUS {
        return Err(TrainError::InsufficientCorpus {
            needed: MIN_CORPUS,
            actual: samples.len(),
        });
    }
    for sample in samples {
        if sample.features.len() != VOCABULARY.len() {
            return Err(TrainError::Fit(format!(
                "feature vector for '{}' has length {}, expected {}",
                sample.disease_label,
                sample.features.len(),
                VOCABULARY.len()
            )));
        }
    }

    let mut disease_labels: Vec<String> = Vec::new();
    let labels: Vec<usize> = samples
        .iter()
        .map(|sample| {
            disease_labels
                .iter()
                .position(|label| label == &sample.disease_label)
                .unwrap_or_else(|| {
                    disease_labels.push(sample.disease_label.clone());
                    disease_labels.len() - 1
                })
        })
        .collect();

    let matrix: Vec<Vec<f32>> = samples.iter().map(|sample| sample.features.clone()).collect();
    let targets: Vec<f32> = samples.iter().map(|sample| sample.severity_scalar).collect();

    let scaler = StandardScaler::fit(&matrix);
    let scaled = scaler.transform_matrix(&matrix);

    let classifier = SoftmaxClassifier::fit(
        &scaled,
        &labels,
        disease_labels.len(),
        CLASSIFIER_LEARNING_RATE,
        CLASSIFIER_EPOCHS,
        TRAIN_SEED,
    );
    let regressor = LinearRegressor::fit(
        &scaled,
        &targets,
        REGRESSOR_LEARNING_RATE,
        REGRESSOR_EPOCHS,
        TRAIN_SEED,
    );
    let k = (samples.len() / 5).clamp(2, 8);
    let clusterer = KMeans::fit(&scaled, k, TRAIN_SEED);

    Ok(ModelBundle {
        scaler,
        classifier,
        regressor,
        clusterer,
        disease_labels,
        trained_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::ModelState;
    use std::sync::Arc;
    use triage_knowledge::base::CURATED_DISEASES;
    use triage_knowledge::heuristics::base_severity;
    use triage_lexicon::vectorize;

    fn curated_corpus() -> Vec<TrainingSample> {
        CURATED_DISEASES
            .iter()
            .map(|(name, symptoms)| TrainingSample {
                features: vectorize(symptoms),
                disease_label: (*name).to_owned(),
                severity_scalar: base_severity(symptoms).scalar(),
            })
            .collect()
    }

    #[test]
    fn tiny_corpus_is_refused() {
        let samples: Vec<TrainingSample> = curated_corpus().into_iter().take(3).collect();
        let err = train(&samples).unwrap_err();
        assert!(matches!(
            err,
            TrainError::InsufficientCorpus { needed: MIN_CORPUS, actual: 3 }
        ));
    }

    #[test]
    fn curated_corpus_trains_a_full_bundle() {
        let samples = curated_corpus();
        let bundle = train(&samples).unwrap();
        assert_eq!(bundle.disease_labels.len(), CURATED_DISEASES.len());
        assert_eq!(bundle.classifier.class_count(), CURATED_DISEASES.len());
        let expected_k = (samples.len() / 5).clamp(2, 8);
        assert_eq!(bundle.clusterer.cluster_count(), expected_k);
    }

    #[test]
    fn failed_retrain_leaves_the_installed_bundle_untouched() {
        let state = ModelState::new();
        state.install(train(&curated_corpus()).unwrap());
        let before = state.current().unwrap();

        let tiny: Vec<TrainingSample> = curated_corpus().into_iter().take(3).collect();
        if let Ok(bundle) = train(&tiny) {
            state.install(bundle);
        }

        let after = state.current().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn malformed_feature_length_is_a_fit_error() {
        let mut samples = curated_corpus();
        samples[0].features.pop();
        assert!(matches!(train(&samples), Err(TrainError::Fit(_))));
    }
}
