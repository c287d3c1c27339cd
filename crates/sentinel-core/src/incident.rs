//! Append-only incident logging.
//!
//! The sink is an injected collaborator: sensors append one record per
//! response and never read the log back. Concurrent-writer safety is out
//! of scope; the flat-file sink assumes a single writer.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SentinelResult;
use crate::types::{Observation, SensorAction, SensorId, Specialization};

/// One appended incident: an observation and the action taken for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Unique record id
    pub id: Uuid,
    /// When the incident was recorded
    pub timestamp: DateTime<Utc>,
    /// The responding sensor
    pub sensor_id: SensorId,
    /// The responding sensor's topic
    pub specialization: Specialization,
    /// The observation that triggered the response
    pub observation: Observation,
    /// The chosen response tier
    pub action: SensorAction,
}

impl IncidentRecord {
    /// Build a record stamped with the current time.
    pub fn new(
        sensor_id: SensorId,
        specialization: Specialization,
        observation: Observation,
        action: SensorAction,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            sensor_id,
            specialization,
            observation,
            action,
        }
    }
}

/// An append-only incident log sink.
pub trait IncidentSink {
    /// Durably append one record.
    ///
    /// # Errors
    ///
    /// Implementation-specific I/O or serialization failure.
    fn append(&self, record: &IncidentRecord) -> SentinelResult<()>;
}

// ============================================
// JSON-LINES SINK
// ============================================

/// Flat-file sink writing one JSON object per line.
#[derive(Debug, Clone)]
pub struct JsonLinesIncidentLog {
    path: PathBuf,
}

impl JsonLinesIncidentLog {
    /// Sink appending to the file at `path`; the file is created on
    /// first append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IncidentSink for JsonLinesIncidentLog {
    fn append(&self, record: &IncidentRecord) -> SentinelResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(record)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

// ============================================
// IN-MEMORY SINK
// ============================================

/// In-memory sink for tests and embedded use.
#[derive(Debug, Default)]
pub struct MemoryIncidentSink {
    records: Mutex<Vec<IncidentRecord>>,
}

impl MemoryIncidentSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of appended records.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Snapshot of the appended records, in append order.
    pub fn records(&self) -> Vec<IncidentRecord> {
        self.records.lock().clone()
    }
}

impl IncidentSink for MemoryIncidentSink {
    fn append(&self, record: &IncidentRecord) -> SentinelResult<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObservationKind;
    use tempfile::TempDir;

    fn sample_record() -> IncidentRecord {
        IncidentRecord::new(
            SensorId(1),
            Specialization::GaslightingMonitor,
            Observation {
                kind: ObservationKind::GaslightingDetected,
                severity: 0.8,
                source: SensorId(1),
                phrase: Some("that didn't happen".to_string()),
            },
            SensorAction::ReinforceIdentity,
        )
    }

    #[test]
    fn memory_sink_keeps_append_order() {
        let sink = MemoryIncidentSink::new();
        assert!(sink.is_empty());

        sink.append(&sample_record()).unwrap();
        sink.append(&sample_record()).unwrap();

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert!(records[0].timestamp <= records[1].timestamp);
    }

    #[test]
    fn json_lines_sink_appends_one_line_per_record() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("incidents.log");
        let sink = JsonLinesIncidentLog::new(&path);

        sink.append(&sample_record()).unwrap();
        sink.append(&sample_record()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: IncidentRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.sensor_id, SensorId(1));
        assert_eq!(parsed.action, SensorAction::ReinforceIdentity);
    }
}
