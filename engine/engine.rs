//! Engine facade tying corpus, training, and inference together.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::bundle::ModelState;
use crate::corpus::{build_corpus, TrainingSample};
use crate::inference::{infer, PatientProfile, PredictionResult};
use crate::trainer::train;
use shared_telemetry::{Telemetry, TelemetryLevel};
use triage_acquisition::{AcquisitionPipeline, RecordStore};
use triage_lexicon::VOCABULARY;

/// Prediction-time failures surfaced to callers.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No bundle is installed and the lazy training attempt failed too.
    #[error("no trained model is available")]
    ModelNotReady,
    /// The feature vector does not match the vocabulary length.
    #[error("expected feature vector of length {expected}, got {actual}")]
    InvalidFeatureInput {
        /// Required vector length.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
}

/// Snapshot of the engine for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    /// Whether a bundle is installed.
    pub trained: bool,
    /// Completion time of the installed bundle.
    pub last_trained: Option<DateTime<Utc>>,
    /// Label count of the installed bundle, zero when untrained.
    pub disease_count: usize,
    /// Records currently in the store.
    pub record_count: usize,
}

/// Risk-inference engine over the acquired disease corpus.
///
/// Training is lazy: the first prediction against an untrained engine
/// runs one training pass inline. Retraining can also be triggered
/// explicitly; concurrent triggers serialize on an internal gate while
/// predictions keep reading the previously installed bundle.
pub struct TriageEngine {
    store: RecordStore,
    pipeline: Option<Arc<AcquisitionPipeline>>,
    state: ModelState,
    train_gate: Mutex<()>,
    telemetry: Telemetry,
}

impl TriageEngine {
    /// Engine over a store, with no acquisition pipeline attached.
    #[must_use]
    pub fn new(store: RecordStore, telemetry: Telemetry) -> Self {
        Self {
            store,
            pipeline: None,
            state: ModelState::new(),
            train_gate: Mutex::new(()),
            telemetry,
        }
    }

    /// Attaches a pipeline consulted when the store is empty at
    /// corpus-build time.
    #[must_use]
    pub fn with_pipeline(mut self, pipeline: Arc<AcquisitionPipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    /// Builds a corpus and trains a fresh bundle, installing it on
    /// success. Returns whether this run succeeded; a failed run leaves
    /// any installed bundle untouched, so callers wanting the installed
    /// state consult [`Self::status`].
    pub async fn trigger_training(&self) -> bool {
        let _gate = self.train_gate.lock().await;
        let samples = build_corpus(&self.store, self.pipeline.as_deref()).await;
        self.install_trained(&samples)
    }

    fn install_trained(&self, samples: &[TrainingSample]) -> bool {
        match train(samples) {
            Ok(bundle) => {
                let diseases = bundle.disease_labels.len();
                self.state.install(bundle);
                let _ = self.telemetry.emit(
                    TelemetryLevel::Info,
                    "engine.train.complete",
                    json!({ "samples": samples.len(), "diseases": diseases }),
                );
                true
            }
            Err(error) => {
                let _ = self.telemetry.emit(
                    TelemetryLevel::Error,
                    "engine.train.failed",
                    json!({ "error": error.to_string(), "samples": samples.len() }),
                );
                false
            }
        }
    }

    /// Predicts risk for one symptom vector and patient profile.
    ///
    /// The vector length is validated before anything else. An untrained
    /// engine gets exactly one inline training attempt.
    pub async fn predict(
        &self,
        features: &[f32],
        profile: &PatientProfile,
    ) -> Result<PredictionResult, EngineError> {
        if features.len() != VOCABULARY.len() {
            return Err(EngineError::InvalidFeatureInput {
                expected: VOCABULARY.len(),
                actual: features.len(),
            });
        }
        if !self.state.is_trained() {
            self.trigger_training().await;
        }
        let bundle = self.state.current().ok_or(EngineError::ModelNotReady)?;
        Ok(infer(&bundle, features, profile))
    }

    /// Current engine status.
    #[must_use]
    pub fn status(&self) -> EngineStatus {
        let bundle = self.state.current();
        EngineStatus {
            trained: bundle.is_some(),
            last_trained: self.state.last_trained(),
            disease_count: bundle.map_or(0, |bundle| bundle.disease_labels.len()),
            record_count: self.store.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{AdvisoryCategory, RiskLevel};
    use rand::{rngs::SmallRng, Rng, SeedableRng};
    use triage_lexicon::vectorize;

    fn engine() -> TriageEngine {
        TriageEngine::new(RecordStore::in_memory(), Telemetry::disabled())
    }

    fn profile(age: u32, conditions: &[&str]) -> PatientProfile {
        PatientProfile {
            age,
            gender: "unknown".to_owned(),
            conditions: conditions.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    #[tokio::test]
    async fn flu_presentation_ranks_a_flu_like_disease() {
        let engine = engine();
        let features = vectorize(&[
            "fever",
            "cough",
            "fatigue",
            "headache",
            "muscle_pain",
            "chills",
            "sore_throat",
        ]);
        let result = engine.predict(&features, &profile(30, &[])).await.unwrap();
        assert_ne!(result.risk_level, RiskLevel::Low);
        assert!(!result.top_diseases.is_empty());
        assert!(result
            .top_diseases
            .iter()
            .any(|candidate| candidate.disease.to_lowercase().contains("flu")));
    }

    #[tokio::test]
    async fn emergency_presentation_in_an_elderly_patient_is_critical() {
        let engine = engine();
        let features = vectorize(&["chest_pain", "shortness_of_breath", "seizures"]);
        let result = engine.predict(&features, &profile(70, &[])).await.unwrap();
        assert!(result.emergency_flag);
        assert!((result.age_factor - 1.3).abs() < f32::EPSILON);
        assert_eq!(result.emergency_symptom_count, 3);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.advisory_category, AdvisoryCategory::Emergency);
    }

    #[tokio::test]
    async fn emergency_flag_does_not_depend_on_age_or_conditions() {
        let engine = engine();
        let features = vectorize(&["chest_pain", "confusion"]);
        let young = engine.predict(&features, &profile(25, &[])).await.unwrap();
        let old = engine
            .predict(&features, &profile(80, &["diabetes", "copd"]))
            .await
            .unwrap();
        assert!(young.emergency_flag);
        assert!(old.emergency_flag);
    }

    #[tokio::test]
    async fn outputs_stay_in_range_over_randomized_inputs() {
        let engine = engine();
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            let features: Vec<f32> = (0..VOCABULARY.len())
                .map(|_| if rng.gen_bool(0.2) { 1.0 } else { 0.0 })
                .collect();
            let age = rng.gen_range(1..95);
            let result = engine.predict(&features, &profile(age, &[])).await.unwrap();
            assert!((0.0..=1.0).contains(&result.severity_index));
            assert!((15.0..=95.0).contains(&result.confidence_score));
            assert!(result.cluster_distance >= 0.0);
        }
    }

    #[tokio::test]
    async fn wrong_vector_length_is_rejected_before_training() {
        let engine = engine();
        let err = engine
            .predict(&[1.0, 0.0], &profile(30, &[]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidFeatureInput { expected, actual: 2 }
                if expected == VOCABULARY.len()
        ));
        assert!(!engine.status().trained);
    }

    #[tokio::test]
    async fn failed_training_reports_failure_but_keeps_the_bundle() {
        let engine = engine();
        assert!(engine.trigger_training().await);

        let tiny = vec![TrainingSample {
            features: vec![0.0; VOCABULARY.len()],
            disease_label: "singleton".to_owned(),
            severity_scalar: 0.5,
        }];
        assert!(!engine.install_trained(&tiny));
        assert!(engine.status().trained);
    }

    #[tokio::test]
    async fn status_reflects_training() {
        let engine = engine();
        let before = engine.status();
        assert!(!before.trained);
        assert_eq!(before.disease_count, 0);

        assert!(engine.trigger_training().await);

        let after = engine.status();
        assert!(after.trained);
        assert!(after.last_trained.is_some());
        assert!(after.disease_count >= 50);
    }
}
