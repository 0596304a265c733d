#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Acquisition of disease records from heterogeneous medical-information
//! pages, with curated backfill and an idempotent record store.

/// Disease record shape and provenance.
#[path = "../record.rs"]
pub mod record;

/// First-write-wins record store with optional JSONL backing.
#[path = "../store.rs"]
pub mod store;

/// External page fetch boundary.
#[path = "../fetch.rs"]
pub mod fetch;

/// Best-effort markup heuristics (sections, lists, links).
#[path = "../markup.rs"]
pub mod markup;

/// Declarative external source table.
#[path = "../sources.rs"]
pub mod sources;

/// Pipeline orchestration across all sources.
#[path = "../pipeline.rs"]
pub mod pipeline;

pub use fetch::{FetchError, HttpPageFetcher, PageFetcher};
pub use pipeline::{AcquisitionPipeline, AcquisitionReport};
pub use record::{DiseaseRecord, Provenance};
pub use sources::SourceSpec;
pub use store::RecordStore;
