//! Builds the labeled training corpus from stored disease records.

use triage_acquisition::{AcquisitionPipeline, RecordStore};
use triage_knowledge::base::CURATED_DISEASES;
use triage_knowledge::heuristics::{base_severity, severity_scalar};
use triage_lexicon::vectorize;

/// One labeled training sample, derived 1:1 from a disease record.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    /// Binary feature vector over the symptom vocabulary.
    pub features: Vec<f32>,
    /// Disease name the sample is labeled with.
    pub disease_label: String,
    /// Severity regression target in [0, 1].
    pub severity_scalar: f32,
}

fn curated_sample(name: &str, symptoms: &[&str]) -> TrainingSample {
    TrainingSample {
        features: vectorize(symptoms),
        disease_label: name.to_owned(),
        severity_scalar: base_severity(symptoms).scalar(),
    }
}

/// Reads all stored records into training samples.
///
/// An empty store triggers one synchronous pipeline run (when a pipeline
/// is available) before re-reading; a store that is still empty yields a
/// corpus built purely from the curated base. Either way, every curated
/// disease missing from the label set is appended afterwards, so the
/// corpus label set is always a superset of the curated set.
pub async fn build_corpus(
    store: &RecordStore,
    pipeline: Option<&AcquisitionPipeline>,
) -> Vec<TrainingSample> {
    let mut records = store.read_all();
    if records.is_empty() {
        if let Some(pipeline) = pipeline {
            pipeline.run().await;
            records = store.read_all();
        }
    }

    if records.is_empty() {
        return CURATED_DISEASES
            .iter()
            .map(|(name, symptoms)| curated_sample(name, symptoms))
            .collect();
    }

    let mut samples: Vec<TrainingSample> = records
        .iter()
        .map(|record| TrainingSample {
            features: vectorize(&record.symptoms),
            disease_label: record.name.clone(),
            severity_scalar: severity_scalar(record.severity.label()),
        })
        .collect();

    for (name, symptoms) in CURATED_DISEASES {
        let covered = samples
            .iter()
            .any(|sample| sample.disease_label.to_lowercase() == *name);
        if !covered {
            samples.push(curated_sample(name, symptoms));
        }
    }
    samples
}
