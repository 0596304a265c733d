//! First-write-wins disease record store.
//!
//! Records live in an ordered in-memory map keyed by case-insensitive
//! name, optionally backed by an append-only JSONL file so re-ingestion
//! across restarts stays idempotent.

use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};

use crate::record::DiseaseRecord;

struct StoreInner {
    records: RwLock<IndexMap<String, DiseaseRecord>>,
    writer: Option<Mutex<File>>,
}

/// Shared handle over the record store. Cloning shares the same backing.
#[derive(Clone)]
pub struct RecordStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("records", &self.len())
            .finish()
    }
}

impl RecordStore {
    /// Creates a purely in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                records: RwLock::new(IndexMap::new()),
                writer: None,
            }),
        }
    }

    /// Opens a file-backed store, loading any previously persisted records.
    /// Lines that fail to parse are skipped.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating record store dir {}", parent.display()))?;
        }
        let mut records = IndexMap::new();
        if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("reading record store {}", path.display()))?;
            for line in contents.lines().filter(|line| !line.trim().is_empty()) {
                if let Ok(record) = serde_json::from_str::<DiseaseRecord>(line) {
                    records.entry(record.identity()).or_insert(record);
                }
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening record store {}", path.display()))?;
        Ok(Self {
            inner: Arc::new(StoreInner {
                records: RwLock::new(records),
                writer: Some(Mutex::new(file)),
            }),
        })
    }

    /// Inserts a record unless its identity is already present. Returns
    /// whether the record was written. Existing records are never
    /// overwritten, which keeps re-ingestion idempotent.
    pub fn write_if_absent(&self, record: &DiseaseRecord) -> Result<bool> {
        let identity = record.identity();
        let mut guard = self.inner.records.write();
        if guard.contains_key(&identity) {
            return Ok(false);
        }
        if let Some(writer) = &self.inner.writer {
            let mut file = writer.lock();
            serde_json::to_writer(&mut *file, record)?;
            file.write_all(b"\n")?;
            file.flush()?;
        }
        guard.insert(identity, record.clone());
        Ok(true)
    }

    /// Snapshot of all records in insertion order.
    #[must_use]
    pub fn read_all(&self) -> Vec<DiseaseRecord> {
        self.inner.records.read().values().cloned().collect()
    }

    /// Whether a record with this (case-insensitive) name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner
            .records
            .read()
            .contains_key(&name.trim().to_lowercase())
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.records.read().len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.records.read().is_empty()
    }

}
