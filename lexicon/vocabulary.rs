//! The fixed symptom vocabulary.
//!
//! Ordering is significant: position `i` is feature index `i` in every
//! vector the engine produces or consumes, so the list must never be
//! reordered or resized at runtime.

/// Canonical symptom tokens, in feature-index order.
pub const VOCABULARY: [&str; 50] = [
    "fever",
    "cough",
    "headache",
    "fatigue",
    "nausea",
    "vomiting",
    "diarrhea",
    "chest_pain",
    "shortness_of_breath",
    "dizziness",
    "muscle_pain",
    "joint_pain",
    "sore_throat",
    "runny_nose",
    "congestion",
    "chills",
    "sweating",
    "rash",
    "abdominal_pain",
    "back_pain",
    "weight_loss",
    "appetite_loss",
    "insomnia",
    "anxiety",
    "depression",
    "blurred_vision",
    "numbness",
    "tingling",
    "swelling",
    "bruising",
    "bleeding",
    "itching",
    "dry_mouth",
    "frequent_urination",
    "blood_in_urine",
    "constipation",
    "heartburn",
    "difficulty_swallowing",
    "ear_pain",
    "eye_pain",
    "neck_pain",
    "palpitations",
    "weakness",
    "confusion",
    "seizures",
    "tremors",
    "sneezing",
    "wheezing",
    "night_sweats",
    "hair_loss",
];

/// Tokens flagged as clinically urgent. Two or more of these in one
/// presentation escalate severity and raise the emergency flag.
pub const EMERGENCY_TOKENS: [&str; 8] = [
    "chest_pain",
    "shortness_of_breath",
    "seizures",
    "confusion",
    "bleeding",
    "difficulty_swallowing",
    "palpitations",
    "numbness",
];

/// Normalizes a raw symptom string into vocabulary form: lowercase,
/// trimmed, internal spaces replaced with underscores.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Feature index of a canonical token, if it is in the vocabulary.
#[must_use]
pub fn token_index(token: &str) -> Option<usize> {
    VOCABULARY.iter().position(|entry| *entry == token)
}

/// Whether a canonical token belongs to the emergency subset.
#[must_use]
pub fn is_emergency(token: &str) -> bool {
    EMERGENCY_TOKENS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_emergency_token_is_in_the_vocabulary() {
        for token in EMERGENCY_TOKENS {
            assert!(token_index(token).is_some(), "{token} missing");
        }
    }

    #[test]
    fn normalize_folds_case_and_spaces() {
        assert_eq!(normalize("  Chest Pain "), "chest_pain");
        assert_eq!(normalize("fever"), "fever");
    }
}
