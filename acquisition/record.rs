//! Persisted disease record and its provenance tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use triage_knowledge::heuristics::{
    base_severity, recommended_actions, risk_indicators, Severity,
};

/// Synthetic source tag used for curated backfill records.
pub const CURATED_SOURCE_TAG: &str = "curated_medical_knowledge_base";

/// How a record's symptom set was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Extracted from the symptom section of a detail page.
    DeepScraped,
    /// Extraction came up short; symptoms taken from the curated base.
    Fallback,
    /// Appended from the curated base to guarantee coverage.
    KnowledgeBase,
}

/// One disease with its symptom profile and derived risk data.
///
/// Identity is the case-insensitive name; the store keeps at most one
/// record per identity and the first write wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseaseRecord {
    /// Display name as found on the source page (or curated key).
    pub name: String,
    /// Canonical symptom tokens, in extraction order.
    pub symptoms: Vec<String>,
    /// Baseline severity tier.
    pub severity: Severity,
    /// Ordered recommended actions.
    pub recommended_actions: Vec<String>,
    /// Ordered risk-indicator categories.
    pub risk_indicators: Vec<String>,
    /// Page the symptoms came from, or the curated source tag.
    pub source_url: String,
    /// How the symptom set was obtained.
    pub provenance: Provenance,
    /// When the record was created.
    pub acquired_at: DateTime<Utc>,
}

impl DiseaseRecord {
    /// Builds a record from a symptom set, deriving severity, actions, and
    /// indicators from the risk heuristics.
    #[must_use]
    pub fn from_symptoms<S: AsRef<str>>(
        name: impl Into<String>,
        symptoms: &[S],
        source_url: impl Into<String>,
        provenance: Provenance,
    ) -> Self {
        let severity = base_severity(symptoms);
        Self {
            name: name.into(),
            symptoms: symptoms
                .iter()
                .map(|symptom| symptom.as_ref().to_owned())
                .collect(),
            severity,
            recommended_actions: recommended_actions(symptoms),
            risk_indicators: risk_indicators(symptoms),
            source_url: source_url.into(),
            provenance,
            acquired_at: Utc::now(),
        }
    }

    /// Case-insensitive identity key.
    #[must_use]
    pub fn identity(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_risk_data_from_heuristics() {
        let record = DiseaseRecord::from_symptoms(
            "Stroke",
            &["numbness", "confusion", "seizures"],
            "https://example.org/stroke",
            Provenance::DeepScraped,
        );
        assert_eq!(record.severity, Severity::Critical);
        assert!(record
            .risk_indicators
            .contains(&"Neurological risk".to_owned()));
        assert_eq!(record.identity(), "stroke");
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = DiseaseRecord::from_symptoms(
            "Flu",
            &["fever", "cough"],
            CURATED_SOURCE_TAG,
            Provenance::KnowledgeBase,
        );
        let encoded = serde_json::to_string(&record).unwrap();
        assert!(encoded.contains("knowledge_base"));
        let decoded: DiseaseRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.symptoms, vec!["fever", "cough"]);
        assert_eq!(decoded.provenance, Provenance::KnowledgeBase);
    }
}
