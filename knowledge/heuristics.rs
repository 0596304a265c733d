//! Deterministic severity, action, and risk-indicator rules.
//!
//! All three are pure functions over a symptom set. Check order matters:
//! emergency-token counts are evaluated before the total-count rule.

use std::fmt;

use serde::{Deserialize, Serialize};
use triage_lexicon::vocabulary::is_emergency;

/// Baseline severity tier assigned to a symptom set or disease record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Few, non-urgent symptoms.
    Low,
    /// Broad symptom load without urgent markers.
    Medium,
    /// Two urgent markers present.
    High,
    /// Three or more urgent markers present.
    Critical,
}

impl Severity {
    /// Lowercase label used in persisted records.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    /// Regression target for this tier.
    #[must_use]
    pub const fn scalar(self) -> f32 {
        match self {
            Self::Low => 0.2,
            Self::Medium => 0.5,
            Self::High => 0.75,
            Self::Critical => 0.95,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Regression target for a persisted severity label. Unrecognized labels
/// fall back to 0.3.
#[must_use]
pub fn severity_scalar(label: &str) -> f32 {
    match label {
        "low" => 0.2,
        "medium" => 0.5,
        "high" => 0.75,
        "critical" => 0.95,
        _ => 0.3,
    }
}

/// Baseline severity for a symptom set: three or more emergency tokens is
/// critical, two is high, six or more symptoms overall is medium, anything
/// else is low. The empty set is low.
#[must_use]
pub fn base_severity<S: AsRef<str>>(symptoms: &[S]) -> Severity {
    let emergency = symptoms
        .iter()
        .filter(|symptom| is_emergency(symptom.as_ref()))
        .count();
    if emergency >= 3 {
        Severity::Critical
    } else if emergency >= 2 {
        Severity::High
    } else if symptoms.len() >= 6 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Tier-based base actions plus additive per-symptom advice. Additions are
/// non-exclusive; a feverish cough collects both lines.
#[must_use]
pub fn recommended_actions<S: AsRef<str>>(symptoms: &[S]) -> Vec<String> {
    let mut actions = Vec::new();
    match base_severity(symptoms) {
        Severity::Critical => {
            actions.push("Seek emergency medical attention immediately".to_owned());
            actions.push("Call emergency services if symptoms worsen".to_owned());
        }
        Severity::High => {
            actions.push("Schedule an urgent doctor appointment".to_owned());
            actions.push("Monitor symptoms closely every few hours".to_owned());
        }
        Severity::Medium | Severity::Low => {
            actions.push("Rest and maintain hydration".to_owned());
            actions.push("Schedule a routine medical consultation".to_owned());
        }
    }
    let has = |token: &str| symptoms.iter().any(|symptom| symptom.as_ref() == token);
    if has("fever") {
        actions.push("Monitor temperature regularly".to_owned());
    }
    if has("cough") {
        actions.push("Stay hydrated and consider warm fluids".to_owned());
    }
    if has("chest_pain") {
        actions.push("Avoid physical exertion until evaluated".to_owned());
    }
    actions
}

/// Fixed symptom-to-category indicator table.
const INDICATOR_RULES: &[(&str, &str)] = &[
    ("chest_pain", "Cardiac risk"),
    ("shortness_of_breath", "Respiratory risk"),
    ("seizures", "Neurological risk"),
    ("bleeding", "Hemorrhagic risk"),
    ("confusion", "Cognitive risk"),
    ("numbness", "Neuropathic risk"),
];

/// Risk-indicator categories for a symptom set. Never empty: when no rule
/// matches, a standard-monitoring indicator is emitted.
#[must_use]
pub fn risk_indicators<S: AsRef<str>>(symptoms: &[S]) -> Vec<String> {
    let mut indicators = Vec::new();
    for (token, category) in INDICATOR_RULES {
        if symptoms.iter().any(|symptom| symptom.as_ref() == *token) {
            indicators.push((*category).to_owned());
        }
    }
    if indicators.is_empty() {
        indicators.push("Standard monitoring recommended".to_owned());
    }
    indicators
}

#[cfg(test)]
mod tests {
    use super::*;
    use triage_lexicon::vocabulary::EMERGENCY_TOKENS;

    #[test]
    fn empty_set_is_low() {
        assert_eq!(base_severity::<&str>(&[]), Severity::Low);
    }

    #[test]
    fn all_emergency_tokens_are_critical() {
        assert_eq!(base_severity(&EMERGENCY_TOKENS), Severity::Critical);
    }

    #[test]
    fn two_emergency_tokens_are_high() {
        assert_eq!(
            base_severity(&["chest_pain", "bleeding"]),
            Severity::High
        );
    }

    #[test]
    fn six_plain_symptoms_are_medium() {
        let symptoms = ["fever", "cough", "fatigue", "rash", "chills", "sweating"];
        assert_eq!(base_severity(&symptoms), Severity::Medium);
    }

    #[test]
    fn actions_stack_per_symptom_advice() {
        let actions = recommended_actions(&["fever", "cough"]);
        assert!(actions.iter().any(|a| a.contains("temperature")));
        assert!(actions.iter().any(|a| a.contains("warm fluids")));
        assert!(actions.iter().any(|a| a.contains("Rest")));
    }

    #[test]
    fn indicators_never_empty() {
        assert_eq!(
            risk_indicators(&["rash"]),
            vec!["Standard monitoring recommended".to_owned()]
        );
        let indicators = risk_indicators(&["seizures", "confusion"]);
        assert_eq!(indicators, vec!["Neurological risk", "Cognitive risk"]);
    }

    #[test]
    fn unknown_severity_label_defaults() {
        assert!((severity_scalar("mystery") - 0.3).abs() < f32::EPSILON);
        assert!((severity_scalar("critical") - Severity::Critical.scalar()).abs() < f32::EPSILON);
    }
}
