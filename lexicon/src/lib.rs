#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Canonical symptom vocabulary plus the text and vector mappings built on it.

/// Fixed symptom vocabulary and emergency subset.
#[path = "../vocabulary.rs"]
pub mod vocabulary;

/// Symptom list to binary feature vector mapping.
#[path = "../vectorizer.rs"]
pub mod vectorizer;

/// Free-text to canonical symptom token extraction.
#[path = "../extractor.rs"]
pub mod extractor;

pub use extractor::extract_symptoms;
pub use vectorizer::{active_count, emergency_count, vectorize};
pub use vocabulary::{is_emergency, normalize, token_index, EMERGENCY_TOKENS, VOCABULARY};
