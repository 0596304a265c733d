//! Symptom list to fixed-length binary feature vector.

use crate::vocabulary::{is_emergency, normalize, token_index, VOCABULARY};

/// Maps symptom strings to a binary vector of length [`VOCABULARY`].
///
/// Inputs are normalized before lookup; unrecognized tokens are ignored.
/// The mapping is deterministic, order-independent, and idempotent with
/// respect to duplicates.
#[must_use]
pub fn vectorize<S: AsRef<str>>(symptoms: &[S]) -> Vec<f32> {
    let mut vector = vec![0.0; VOCABULARY.len()];
    for symptom in symptoms {
        if let Some(index) = token_index(&normalize(symptom.as_ref())) {
            vector[index] = 1.0;
        }
    }
    vector
}

/// Number of active features in a vector.
#[must_use]
pub fn active_count(vector: &[f32]) -> usize {
    vector.iter().filter(|value| **value > 0.5).count()
}

/// Number of active features belonging to the emergency subset.
#[must_use]
pub fn emergency_count(vector: &[f32]) -> usize {
    vector
        .iter()
        .enumerate()
        .filter(|(index, value)| **value > 0.5 && is_emergency(VOCABULARY[*index]))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectorize_is_case_insensitive_and_idempotent() {
        assert_eq!(
            vectorize(&["Fever", "fever", "FEVER"]),
            vectorize(&["fever"])
        );
    }

    #[test]
    fn vectorize_is_order_independent() {
        assert_eq!(
            vectorize(&["cough", "fever"]),
            vectorize(&["fever", "cough"])
        );
    }

    #[test]
    fn unknown_tokens_yield_the_zero_vector() {
        let vector = vectorize(&["sparkles", "levitation"]);
        assert_eq!(vector, vec![0.0; VOCABULARY.len()]);
        assert_eq!(active_count(&vector), 0);
    }

    #[test]
    fn space_form_matches_underscore_token() {
        let vector = vectorize(&["chest pain"]);
        assert_eq!(active_count(&vector), 1);
        assert_eq!(emergency_count(&vector), 1);
    }
}
