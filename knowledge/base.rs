//! Curated disease-to-symptom ground truth.
//!
//! Roughly fifty common presentations used as training backstop and as the
//! fallback when page extraction comes up empty. A few entries carry tokens
//! outside the canonical vocabulary ("bloating", "sensitivity"); the
//! vectorizer ignores those by design.

/// Curated disease entries, keyed by lowercase name.
pub const CURATED_DISEASES: &[(&str, &[&str])] = &[
    ("flu", &["fever", "cough", "fatigue", "muscle_pain", "headache", "chills", "sore_throat", "congestion", "sweating"]),
    ("influenza", &["fever", "cough", "fatigue", "muscle_pain", "headache", "chills", "sore_throat", "sweating"]),
    ("cold", &["cough", "runny_nose", "congestion", "sore_throat", "sneezing", "fatigue", "headache"]),
    ("common cold", &["cough", "runny_nose", "congestion", "sore_throat", "sneezing", "fatigue"]),
    ("pneumonia", &["fever", "cough", "shortness_of_breath", "chest_pain", "fatigue", "chills", "sweating", "nausea"]),
    ("bronchitis", &["cough", "fatigue", "shortness_of_breath", "chest_pain", "congestion", "sore_throat", "wheezing"]),
    ("asthma", &["shortness_of_breath", "wheezing", "cough", "chest_pain", "fatigue"]),
    ("covid", &["fever", "cough", "fatigue", "shortness_of_breath", "headache", "muscle_pain", "sore_throat", "appetite_loss", "diarrhea"]),
    ("coronavirus", &["fever", "cough", "fatigue", "shortness_of_breath", "headache", "muscle_pain", "appetite_loss"]),
    ("diabetes", &["frequent_urination", "fatigue", "blurred_vision", "weight_loss", "numbness", "tingling", "dry_mouth"]),
    ("hypertension", &["headache", "dizziness", "blurred_vision", "chest_pain", "shortness_of_breath", "nausea", "palpitations"]),
    ("heart disease", &["chest_pain", "shortness_of_breath", "palpitations", "dizziness", "fatigue", "swelling", "weakness"]),
    ("migraine", &["headache", "nausea", "vomiting", "blurred_vision", "dizziness", "fatigue", "numbness"]),
    ("gastritis", &["abdominal_pain", "nausea", "vomiting", "heartburn", "appetite_loss", "bloating"]),
    ("arthritis", &["joint_pain", "swelling", "muscle_pain", "fatigue", "weakness", "numbness", "back_pain"]),
    ("anemia", &["fatigue", "weakness", "dizziness", "shortness_of_breath", "headache", "chest_pain", "palpitations"]),
    ("tuberculosis", &["cough", "fever", "night_sweats", "weight_loss", "fatigue", "chest_pain", "appetite_loss", "bleeding"]),
    ("malaria", &["fever", "chills", "headache", "sweating", "nausea", "vomiting", "muscle_pain", "fatigue"]),
    ("dengue", &["fever", "headache", "muscle_pain", "joint_pain", "rash", "nausea", "fatigue", "bleeding"]),
    ("typhoid", &["fever", "headache", "abdominal_pain", "fatigue", "constipation", "diarrhea", "appetite_loss", "rash"]),
    ("allergy", &["sneezing", "runny_nose", "itching", "rash", "swelling", "congestion", "eye_pain", "wheezing"]),
    ("sinusitis", &["congestion", "headache", "fatigue", "runny_nose", "ear_pain", "sore_throat", "cough"]),
    ("urinary tract infection", &["frequent_urination", "abdominal_pain", "blood_in_urine", "fever", "back_pain", "nausea"]),
    ("kidney disease", &["fatigue", "swelling", "frequent_urination", "nausea", "back_pain", "blood_in_urine", "appetite_loss", "confusion"]),
    ("liver disease", &["fatigue", "nausea", "abdominal_pain", "swelling", "itching", "weight_loss", "bruising", "confusion"]),
    ("depression", &["depression", "fatigue", "insomnia", "appetite_loss", "weight_loss", "anxiety", "confusion", "headache"]),
    ("anxiety disorder", &["anxiety", "palpitations", "sweating", "tremors", "insomnia", "dizziness", "nausea", "chest_pain"]),
    ("stroke", &["numbness", "confusion", "headache", "dizziness", "blurred_vision", "weakness", "difficulty_swallowing", "seizures"]),
    ("epilepsy", &["seizures", "confusion", "dizziness", "numbness", "anxiety", "headache", "fatigue"]),
    ("meningitis", &["fever", "headache", "neck_pain", "nausea", "vomiting", "confusion", "seizures", "rash", "sensitivity"]),
    ("food poisoning", &["nausea", "vomiting", "diarrhea", "abdominal_pain", "fever", "fatigue", "chills", "weakness"]),
    ("gastroenteritis", &["diarrhea", "nausea", "vomiting", "abdominal_pain", "fever", "fatigue", "muscle_pain"]),
    ("eczema", &["itching", "rash", "dry_mouth", "swelling", "insomnia"]),
    ("psoriasis", &["rash", "itching", "joint_pain", "fatigue", "swelling"]),
    ("thyroid", &["fatigue", "weight_loss", "anxiety", "tremors", "sweating", "palpitations", "insomnia", "hair_loss"]),
    ("cancer", &["fatigue", "weight_loss", "appetite_loss", "night_sweats", "fever", "bleeding", "weakness", "back_pain"]),
    ("copd", &["shortness_of_breath", "cough", "wheezing", "chest_pain", "fatigue", "weight_loss", "swelling"]),
    ("gout", &["joint_pain", "swelling", "rash", "fever", "fatigue"]),
    ("fibromyalgia", &["muscle_pain", "fatigue", "insomnia", "headache", "depression", "anxiety", "numbness", "tingling"]),
    ("vertigo", &["dizziness", "nausea", "vomiting", "headache", "sweating", "ear_pain", "blurred_vision"]),
    ("chickenpox", &["rash", "fever", "fatigue", "headache", "itching", "appetite_loss"]),
    ("measles", &["fever", "cough", "rash", "runny_nose", "eye_pain", "fatigue", "sore_throat"]),
    ("mumps", &["fever", "headache", "muscle_pain", "fatigue", "appetite_loss", "swelling", "ear_pain"]),
    ("hepatitis", &["fatigue", "nausea", "abdominal_pain", "appetite_loss", "fever", "joint_pain", "itching"]),
    ("pancreatitis", &["abdominal_pain", "nausea", "vomiting", "fever", "back_pain", "weight_loss", "appetite_loss"]),
    ("appendicitis", &["abdominal_pain", "nausea", "vomiting", "fever", "appetite_loss", "constipation"]),
    ("sciatica", &["back_pain", "numbness", "tingling", "weakness", "muscle_pain"]),
    ("carpal tunnel", &["numbness", "tingling", "weakness", "joint_pain", "muscle_pain"]),
    ("osteoporosis", &["back_pain", "weakness", "joint_pain", "fatigue"]),
    ("ibs", &["abdominal_pain", "diarrhea", "constipation", "nausea", "fatigue", "appetite_loss"]),
];

/// Looks up the curated symptom list for an arbitrarily formatted disease
/// name. Tries a bidirectional whole-name substring match first, then a
/// per-word match for words longer than three characters. Returns the first
/// hit in table order.
#[must_use]
pub fn curated_lookup(disease_name: &str) -> Option<&'static [&'static str]> {
    let name = disease_name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    for (key, symptoms) in CURATED_DISEASES {
        if name.contains(key) || key.contains(&name) {
            return Some(symptoms);
        }
    }
    for word in name.split_whitespace() {
        if word.len() <= 3 {
            continue;
        }
        for (key, symptoms) in CURATED_DISEASES {
            if key.contains(word) || word.contains(key) {
                return Some(symptoms);
            }
        }
    }
    None
}

/// Iterator over the curated disease names.
pub fn curated_names() -> impl Iterator<Item = &'static str> {
    CURATED_DISEASES.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_name_match_is_case_insensitive() {
        assert!(curated_lookup("Pneumonia").is_some());
        assert!(curated_lookup("  FLU ").is_some());
    }

    #[test]
    fn page_titles_match_by_contained_key() {
        let symptoms = curated_lookup("seasonal influenza (flu)").unwrap();
        assert!(symptoms.contains(&"fever"));
    }

    #[test]
    fn word_match_skips_short_words() {
        // "flu" is only three characters, so a title matching on words
        // alone must not reach it through the per-word pass.
        assert!(curated_lookup("xyz abc").is_none());
    }

    #[test]
    fn word_match_finds_multiword_keys() {
        assert!(curated_lookup("chronic kidney problems").is_some());
    }

    #[test]
    fn unknown_names_return_none() {
        assert!(curated_lookup("quantum entanglement").is_none());
        assert!(curated_lookup("").is_none());
    }
}
