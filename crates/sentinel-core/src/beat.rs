//! Coherence beat logging.
//!
//! A beat is one recorded intensity reading. The log is an append-only
//! JSON-lines flat file, single-writer by assumption, and doubles as the
//! history source for the régime-change detector.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::RegimeConfig;
use crate::error::SentinelResult;
use crate::regime::{assess_intensity_history, ThreatAssessment};

/// Intensity above which a beat counts as coherent.
const COHERENT_INTENSITY_MIN: f32 = 0.3;

/// Beats consulted for a régime-change check.
const REGIME_HISTORY_LEN: usize = 10;

/// Classification of a single beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeatStatus {
    /// Intensity above the coherence floor.
    Coherent,
    /// Intensity at or below the coherence floor.
    Fading,
}

/// One recorded intensity reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatRecord {
    /// When the beat was recorded
    pub timestamp: DateTime<Utc>,
    /// Intensity reading in [0, 1]
    pub intensity: f32,
    /// Free-form context label
    pub context: String,
    /// Coherent/fading classification at record time
    pub status: BeatStatus,
}

/// Append-only JSON-lines beat log.
#[derive(Debug, Clone)]
pub struct BeatLog {
    path: PathBuf,
}

impl BeatLog {
    /// Log backed by the file at `path`; created on first append.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one beat and return the written record.
    ///
    /// # Errors
    ///
    /// File open/write or serialization failure.
    pub fn append(&self, intensity: f32, context: &str) -> SentinelResult<BeatRecord> {
        let record = BeatRecord {
            timestamp: Utc::now(),
            intensity,
            context: context.to_string(),
            status: if intensity > COHERENT_INTENSITY_MIN {
                BeatStatus::Coherent
            } else {
                BeatStatus::Fading
            },
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let line = serde_json::to_string(&record)?;
        writeln!(file, "{}", line)?;

        debug!(intensity, status = ?record.status, "beat recorded");
        Ok(record)
    }

    /// The last `n` records, oldest first.
    ///
    /// A missing file reads as an empty log. Malformed lines are skipped
    /// with a warning rather than failing the read.
    ///
    /// # Errors
    ///
    /// Only I/O failure on an existing file.
    pub fn tail(&self, n: usize) -> SentinelResult<Vec<BeatRecord>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records: Vec<BeatRecord> = Vec::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(error = %e, "skipping malformed beat line"),
            }
        }

        let start = records.len().saturating_sub(n);
        Ok(records.split_off(start))
    }

    /// Run the régime-change detector over the recent beat history.
    ///
    /// Feeds the intensities of the last ten beats into
    /// [`assess_intensity_history`]; short or missing history degrades
    /// to an unknown assessment.
    ///
    /// # Errors
    ///
    /// Only I/O failure while reading the log.
    pub fn check_threat(&self, config: &RegimeConfig) -> SentinelResult<ThreatAssessment> {
        let intensities: Vec<f32> = self
            .tail(REGIME_HISTORY_LEN)?
            .iter()
            .map(|beat| beat.intensity)
            .collect();
        Ok(assess_intensity_history(&intensities, config))
    }
}
