#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

//! Structured JSONL telemetry shared by the acquisition and inference modules.

use std::{
    fs::{self, File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Telemetry severity level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TelemetryLevel {
    /// Diagnostic detail.
    Debug,
    /// Normal progress events.
    Info,
    /// Absorbed failures and degraded behavior.
    Warn,
    /// Unrecoverable module errors.
    Error,
}

/// One telemetry event encoded as a JSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Emitting module (e.g. `acquisition.pipeline`).
    pub module: String,
    /// Severity.
    pub level: TelemetryLevel,
    /// Event name.
    pub message: String,
    /// Structured payload (counts, sources, durations).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Append-only JSONL sink shared by every module handle.
#[derive(Debug)]
pub struct EventLog {
    path: PathBuf,
    file: Mutex<File>,
}

impl EventLog {
    /// Opens (or creates) the log file, creating parent directories as needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating telemetry dir {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening telemetry log {}", path.display()))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Appends one record as a JSON line.
    pub fn append(&self, record: &TelemetryRecord) -> Result<()> {
        let mut guard = self.file.lock();
        serde_json::to_writer(&mut *guard, record)?;
        guard.write_all(b"\n")?;
        guard.flush()?;
        Ok(())
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Per-module telemetry handle. Cheap to clone; a disabled handle drops
/// every event.
#[derive(Debug, Clone, Default)]
pub struct Telemetry {
    module: String,
    log: Option<Arc<EventLog>>,
}

impl Telemetry {
    /// Creates a handle writing to the shared log.
    #[must_use]
    pub fn new(module: impl Into<String>, log: Arc<EventLog>) -> Self {
        Self {
            module: module.into(),
            log: Some(log),
        }
    }

    /// Creates a no-op handle.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Emits one event. Callers treat telemetry as best-effort and ignore
    /// the result at emission sites.
    pub fn emit(
        &self,
        level: TelemetryLevel,
        message: &str,
        fields: serde_json::Value,
    ) -> Result<()> {
        let Some(log) = &self.log else {
            return Ok(());
        };
        let mut record = TelemetryRecord {
            timestamp: Utc::now(),
            module: self.module.clone(),
            level,
            message: message.to_owned(),
            fields: serde_json::Map::new(),
        };
        if let Some(map) = fields.as_object() {
            record.fields = map.clone();
        }
        log.append(&record)
    }

    /// Derives a handle for a submodule sharing the same sink.
    #[must_use]
    pub fn scoped(&self, submodule: &str) -> Self {
        Self {
            module: format!("{}.{submodule}", self.module),
            log: self.log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn appends_json_lines() {
        let dir = tempdir().unwrap();
        let log = Arc::new(EventLog::open(dir.path().join("engine.log")).unwrap());
        let telemetry = Telemetry::new("acquisition", Arc::clone(&log));
        telemetry
            .emit(
                TelemetryLevel::Info,
                "acquisition.run.complete",
                json!({ "records": 42 }),
            )
            .unwrap();
        let content = fs::read_to_string(log.path()).unwrap();
        let record: TelemetryRecord = serde_json::from_str(content.lines().next().unwrap()).unwrap();
        assert_eq!(record.module, "acquisition");
        assert_eq!(record.fields["records"], json!(42));
    }

    #[test]
    fn disabled_handle_is_silent() {
        let telemetry = Telemetry::disabled();
        telemetry
            .emit(TelemetryLevel::Error, "noop", json!({}))
            .unwrap();
    }

    #[test]
    fn scoped_handle_extends_module_name() {
        let dir = tempdir().unwrap();
        let log = Arc::new(EventLog::open(dir.path().join("engine.log")).unwrap());
        let telemetry = Telemetry::new("engine", log).scoped("trainer");
        telemetry
            .emit(TelemetryLevel::Debug, "fit.start", json!({}))
            .unwrap();
    }
}
