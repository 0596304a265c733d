//! Best-effort extraction of canonical symptom tokens from free text.
//!
//! Matching is plain substring search: short aliases such as "ache" will
//! over-trigger on fragments, and negations ("no fever") are not
//! understood. Both limitations are accepted; robustness across
//! heterogeneous source text is preferred over precision on any one page.

use crate::vocabulary::VOCABULARY;

/// Colloquial phrase to canonical token aliases, applied in table order
/// after the vocabulary pass.
const ALIASES: &[(&str, &str)] = &[
    ("headache", "headache"),
    ("head pain", "headache"),
    ("stomach pain", "abdominal_pain"),
    ("belly pain", "abdominal_pain"),
    ("tummy pain", "abdominal_pain"),
    ("breathless", "shortness_of_breath"),
    ("difficulty breathing", "shortness_of_breath"),
    ("breath", "shortness_of_breath"),
    ("tired", "fatigue"),
    ("tiredness", "fatigue"),
    ("exhaustion", "fatigue"),
    ("lack of energy", "fatigue"),
    ("feeling sick", "nausea"),
    ("vomit", "vomiting"),
    ("being sick", "vomiting"),
    ("high temperature", "fever"),
    ("temperature", "fever"),
    ("shivering", "chills"),
    ("runny nose", "runny_nose"),
    ("blocked nose", "congestion"),
    ("stuffy nose", "congestion"),
    ("skin rash", "rash"),
    ("spots", "rash"),
    ("ache", "muscle_pain"),
    ("body ache", "muscle_pain"),
    ("dizzy", "dizziness"),
    ("light-headed", "dizziness"),
    ("lightheaded", "dizziness"),
    ("swollen", "swelling"),
    ("puffy", "swelling"),
    ("weight gain", "swelling"),
    ("losing weight", "weight_loss"),
    ("not hungry", "appetite_loss"),
    ("loss of appetite", "appetite_loss"),
    ("trouble sleeping", "insomnia"),
    ("sleep problems", "insomnia"),
    ("pins and needles", "tingling"),
    ("tingle", "tingling"),
    ("blurry vision", "blurred_vision"),
    ("vision problems", "blurred_vision"),
    ("racing heart", "palpitations"),
    ("heart racing", "palpitations"),
    ("irregular heartbeat", "palpitations"),
    ("fits", "seizures"),
    ("convulsions", "seizures"),
    ("shaking", "tremors"),
    ("trembling", "tremors"),
    ("loose stools", "diarrhea"),
    ("watery stools", "diarrhea"),
    ("passing urine", "frequent_urination"),
    ("urinating more", "frequent_urination"),
    ("blood in pee", "blood_in_urine"),
    ("blood when urinating", "blood_in_urine"),
    ("losing hair", "hair_loss"),
    ("hair thinning", "hair_loss"),
    ("night sweat", "night_sweats"),
    ("sweating at night", "night_sweats"),
    ("difficulty eating", "difficulty_swallowing"),
    ("hard to swallow", "difficulty_swallowing"),
    ("acid reflux", "heartburn"),
    ("indigestion", "heartburn"),
    ("irritable", "anxiety"),
    ("nervous", "anxiety"),
    ("worry", "anxiety"),
    ("feeling down", "depression"),
    ("low mood", "depression"),
    ("sadness", "depression"),
];

/// Extracts canonical symptom tokens mentioned in `text`.
///
/// Pass 1 scans the vocabulary in index order, matching either the
/// underscore or the space form of each token. Pass 2 applies the alias
/// table, appending tokens not already found. The result is deduplicated
/// and ordered by discovery.
#[must_use]
pub fn extract_symptoms(text: &str) -> Vec<&'static str> {
    let haystack = text.to_lowercase();
    let mut found = Vec::new();
    for token in VOCABULARY {
        let spaced = token.replace('_', " ");
        if haystack.contains(&spaced) || haystack.contains(token) {
            found.push(token);
        }
    }
    for (phrase, token) in ALIASES {
        if haystack.contains(phrase) && !found.contains(token) {
            found.push(*token);
        }
    }
    found
}
