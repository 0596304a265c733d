//! Multi-factor risk inference over a trained bundle.

use serde::{Deserialize, Serialize};

use crate::bundle::ModelBundle;
use triage_lexicon::{EMERGENCY_TOKENS, VOCABULARY};

/// Patient context that adjusts the model's raw severity estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age in years.
    pub age: u32,
    /// Free-form gender string, recorded but not used in scoring.
    #[serde(default = "default_gender")]
    pub gender: String,
    /// Pre-existing conditions, matched against the high-risk list.
    #[serde(default)]
    pub conditions: Vec<String>,
}

fn default_gender() -> String {
    "unknown".to_owned()
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            age: 30,
            gender: default_gender(),
            conditions: Vec::new(),
        }
    }
}

/// Risk tier derived from the final severity index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Final severity below 0.35.
    Low,
    /// Final severity in [0.35, 0.6).
    Medium,
    /// Final severity in [0.6, 0.8).
    High,
    /// Final severity of 0.8 or above.
    Critical,
}

/// Care pathway the result routes the patient toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisoryCategory {
    /// Emergency services now.
    Emergency,
    /// Provider appointment within 24 hours.
    #[serde(rename = "Urgent Care")]
    UrgentCare,
    /// Primary care appointment within the week.
    #[serde(rename = "Schedule Doctor")]
    ScheduleDoctor,
    /// Rest and monitor.
    #[serde(rename = "Self-Care")]
    SelfCare,
}

impl AdvisoryCategory {
    /// Fixed guidance text for the category.
    #[must_use]
    pub const fn guidance(self) -> &'static str {
        match self {
            Self::Emergency => {
                "Immediate medical attention is strongly recommended. Please contact \
                 emergency services or visit the nearest emergency room."
            }
            Self::UrgentCare => {
                "Prompt medical evaluation is recommended. Schedule an urgent \
                 appointment with a healthcare provider within 24 hours."
            }
            Self::ScheduleDoctor => {
                "A medical consultation is advisable. Schedule an appointment with \
                 your primary care physician within the week."
            }
            Self::SelfCare => {
                "Symptoms suggest a manageable condition. Rest, stay hydrated, and \
                 monitor your symptoms. Seek medical advice if they persist or worsen."
            }
        }
    }
}

/// One candidate disease with its probability as a percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiseasePrediction {
    /// Disease name from the training label set.
    pub disease: String,
    /// Class probability in percent, rounded to two decimals.
    pub probability: f32,
}

/// Full inference output for one symptom presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Up to five candidates above the 1% probability floor, best first.
    pub top_diseases: Vec<DiseasePrediction>,
    /// Final severity in [0, 1], rounded to four decimals.
    pub severity_index: f32,
    /// Risk tier for `severity_index`.
    pub risk_level: RiskLevel,
    /// Assigned symptom-pattern cluster.
    pub cluster_id: usize,
    /// Euclidean distance to the cluster centroid, rounded to four decimals.
    pub cluster_distance: f32,
    /// Confidence score in [15, 95], rounded to two decimals.
    pub confidence_score: f32,
    /// Raised on two or more emergency symptoms or critical severity.
    pub emergency_flag: bool,
    /// Care pathway.
    pub advisory_category: AdvisoryCategory,
    /// Guidance text for the category.
    pub advisory_text: &'static str,
    /// Age multiplier that was applied.
    pub age_factor: f32,
    /// Comorbidity multiplier that was applied.
    pub condition_factor: f32,
    /// Active symptoms that are emergency symptoms.
    pub emergency_symptom_count: usize,
    /// Total active symptoms in the input vector.
    pub active_symptom_count: usize,
}

/// Comorbidities that raise the condition factor, matched as lowercase
/// substrings of the reported condition.
const HIGH_RISK_CONDITIONS: [&str; 9] = [
    "diabetes",
    "heart disease",
    "hypertension",
    "cancer",
    "asthma",
    "copd",
    "kidney",
    "liver",
    "hiv",
];

fn age_factor(age: u32) -> f32 {
    if age > 65 || age < 5 {
        1.3
    } else if age > 50 || age < 12 {
        1.15
    } else {
        1.0
    }
}

fn condition_factor(conditions: &[String]) -> f32 {
    let mut factor = 1.0;
    for condition in conditions {
        let lowered = condition.to_lowercase();
        if HIGH_RISK_CONDITIONS.iter().any(|risk| lowered.contains(risk)) {
            factor += 0.15;
        }
    }
    factor
}

fn round_to(value: f32, decimals: i32) -> f32 {
    let scale = 10.0_f32.powi(decimals);
    (value * scale).round() / scale
}

/// Runs the full inference pass against a trained bundle.
///
/// `features` must already have vocabulary length; the engine facade
/// validates that before calling in.
#[must_use]
pub fn infer(bundle: &ModelBundle, features: &[f32], profile: &PatientProfile) -> PredictionResult {
    let scaled = bundle.scaler.transform(features);

    let probabilities = bundle.classifier.predict_proba(&scaled);
    let mut ranked: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    let top_diseases: Vec<DiseasePrediction> = ranked
        .iter()
        .take(5)
        .filter(|(_, probability)| *probability > 0.01)
        .map(|(index, probability)| DiseasePrediction {
            disease: bundle.disease_labels[*index].clone(),
            probability: round_to(probability * 100.0, 2),
        })
        .collect();

    let severity_raw = bundle.regressor.predict(&scaled).clamp(0.0, 1.0);
    let (cluster_id, cluster_distance) = bundle.clusterer.assign(&scaled);

    let age_factor = age_factor(profile.age);
    let condition_factor = condition_factor(&profile.conditions);

    let active_symptom_count = features.iter().filter(|value| **value == 1.0).count();
    let emergency_symptom_count = features
        .iter()
        .zip(VOCABULARY.iter())
        .filter(|(value, token)| **value == 1.0 && EMERGENCY_TOKENS.contains(token))
        .count();

    let mut adjusted = (severity_raw * age_factor * condition_factor).min(1.0);
    if emergency_symptom_count >= 2 {
        adjusted = (adjusted + 0.25).min(1.0);
    }

    let density_factor = if cluster_distance < 1.0 {
        1.15
    } else if cluster_distance > 3.0 {
        0.9
    } else {
        1.0
    };
    let final_severity = (adjusted * density_factor).min(1.0);

    let risk_level = if final_severity >= 0.8 {
        RiskLevel::Critical
    } else if final_severity >= 0.6 {
        RiskLevel::High
    } else if final_severity >= 0.35 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };
    let emergency_flag = emergency_symptom_count >= 2 || final_severity >= 0.8;

    let top_probability = top_diseases.first().map_or(0.0, |top| top.probability);
    let coverage = active_symptom_count as f32 / VOCABULARY.len() as f32;
    // The distance term goes negative past 5.0 and simply drags the score
    // toward the 15-point floor.
    let confidence = (top_probability * 0.6
        + coverage * 100.0 * 0.2
        + (1.0 - cluster_distance / 5.0) * 100.0 * 0.2)
        .clamp(15.0, 95.0);

    let advisory_category = if risk_level == RiskLevel::Critical || emergency_flag {
        AdvisoryCategory::Emergency
    } else if risk_level == RiskLevel::High {
        AdvisoryCategory::UrgentCare
    } else if risk_level == RiskLevel::Medium {
        AdvisoryCategory::ScheduleDoctor
    } else {
        AdvisoryCategory::SelfCare
    };

    PredictionResult {
        top_diseases,
        severity_index: round_to(final_severity, 4),
        risk_level,
        cluster_id,
        cluster_distance: round_to(cluster_distance, 4),
        confidence_score: round_to(confidence, 2),
        emergency_flag,
        advisory_category,
        advisory_text: advisory_category.guidance(),
        age_factor,
        condition_factor,
        emergency_symptom_count,
        active_symptom_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_extremes_get_the_highest_factor() {
        assert!((age_factor(70) - 1.3).abs() < f32::EPSILON);
        assert!((age_factor(3) - 1.3).abs() < f32::EPSILON);
        assert!((age_factor(55) - 1.15).abs() < f32::EPSILON);
        assert!((age_factor(8) - 1.15).abs() < f32::EPSILON);
        assert!((age_factor(30) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn condition_factor_stacks_per_matching_condition() {
        let conditions = vec![
            "Type 2 Diabetes".to_owned(),
            "chronic kidney disease".to_owned(),
            "seasonal allergies".to_owned(),
        ];
        assert!((condition_factor(&conditions) - 1.3).abs() < 1e-6);
        assert!((condition_factor(&[]) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn confidence_saturates_at_the_floor_for_far_out_presentations() {
        use crate::corpus::TrainingSample;
        use crate::trainer::train;
        use triage_knowledge::base::CURATED_DISEASES;
        use triage_knowledge::heuristics::base_severity;
        use triage_lexicon::vectorize;

        let samples: Vec<TrainingSample> = CURATED_DISEASES
            .iter()
            .map(|(name, symptoms)| TrainingSample {
                features: vectorize(symptoms),
                disease_label: (*name).to_owned(),
                severity_scalar: base_severity(symptoms).scalar(),
            })
            .collect();
        let bundle = train(&samples).unwrap();

        // Every symptom at once sits far from every centroid; the distance
        // term goes deeply negative and the clamp holds the floor.
        let everything = vec![1.0; VOCABULARY.len()];
        let result = infer(&bundle, &everything, &PatientProfile::default());
        assert!(result.cluster_distance > 3.0);
        assert!((15.0..=95.0).contains(&result.confidence_score));
    }

    #[test]
    fn advisory_categories_serialize_with_their_display_names() {
        let json = serde_json::to_string(&AdvisoryCategory::UrgentCare).unwrap();
        assert_eq!(json, "\"Urgent Care\"");
        let json = serde_json::to_string(&AdvisoryCategory::SelfCare).unwrap();
        assert_eq!(json, "\"Self-Care\"");
    }
}
