#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Curated disease knowledge and the deterministic risk rules built on it.

/// Static disease-to-symptom ground truth and curated lookup.
#[path = "../base.rs"]
pub mod base;

/// Severity, action, and risk-indicator heuristics.
#[path = "../heuristics.rs"]
pub mod heuristics;

pub use base::{curated_lookup, curated_names, CURATED_DISEASES};
pub use heuristics::{
    base_severity, recommended_actions, risk_indicators, severity_scalar, Severity,
};
