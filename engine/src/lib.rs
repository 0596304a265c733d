#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Model ensemble training and risk inference over the disease corpus.

/// Training samples derived from stored records or the curated base.
#[path = "../corpus.rs"]
pub mod corpus;

/// Per-feature standardization.
#[path = "../scaler.rs"]
pub mod scaler;

/// Multinomial logistic (softmax) disease classifier.
#[path = "../classifier.rs"]
pub mod classifier;

/// Linear severity regressor.
#[path = "../regressor.rs"]
pub mod regressor;

/// Seeded k-means partitioning.
#[path = "../cluster.rs"]
pub mod cluster;

/// Immutable model bundle and its atomically swapped slot.
#[path = "../bundle.rs"]
pub mod bundle;

/// Ensemble training over a corpus.
#[path = "../trainer.rs"]
pub mod trainer;

/// Multi-factor risk inference over a trained bundle.
#[path = "../inference.rs"]
pub mod inference;

/// Public engine facade: training, prediction, status.
#[path = "../engine.rs"]
pub mod engine;

pub use bundle::{ModelBundle, ModelState};
pub use corpus::{build_corpus, TrainingSample};
pub use engine::{EngineError, EngineStatus, TriageEngine};
pub use inference::{
    infer, AdvisoryCategory, DiseasePrediction, PatientProfile, PredictionResult, RiskLevel,
};
pub use trainer::{train, TrainError};
