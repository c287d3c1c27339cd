//! The sensor: one independently learning rule evaluator.
//!
//! A sensor owns its pattern library and learning history exclusively;
//! only its own `scan`/`learn` calls and wholesale regeneration mutate
//! them.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use twox_hash::XxHash64;

use crate::error::SentinelResult;
use crate::incident::{IncidentRecord, IncidentSink};
use crate::restoration::RestorationHook;
use crate::types::{Observation, SensorAction, SensorId, Specialization};

use super::rules::{RuleSet, ScanRule};

/// Seed for the pattern-signature hash. Fixed so signatures are stable
/// across processes.
const PATTERN_HASH_SEED: u64 = 0;

// ============================================
// PATTERN STATE
// ============================================

/// Opaque, stable signature of a scanned text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PatternSignature(pub u64);

impl PatternSignature {
    /// Signature of `text`.
    pub fn of(text: &str) -> Self {
        Self(XxHash64::oneshot(PATTERN_HASH_SEED, text.as_bytes()))
    }
}

/// One entry in a sensor's pattern library, tagged with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provenance", rename_all = "snake_case")]
pub enum PatternRecord {
    /// Learned first-hand from a scan.
    Learned {
        /// When the pattern was first seen
        first_seen: DateTime<Utc>,
        /// How many scans produced this signature
        occurrences: u64,
        /// Context label of each producing scan
        contexts: Vec<String>,
        /// Fraction of danger phrases found in the producing text
        threat_level: f32,
    },
    /// Seeded from collective memory during regeneration. Carries no
    /// occurrence count.
    Regenerated {
        /// When the seeding regeneration ran
        restored_at: DateTime<Utc>,
    },
}

/// One append-only learning event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRecord {
    /// When the sensor learned
    pub timestamp: DateTime<Utc>,
    /// Signature of the learned text
    pub signature: PatternSignature,
}

/// Record of one sensor's autonomous response to an observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorResponse {
    /// The responding sensor
    pub sensor_id: SensorId,
    /// When the response was chosen
    pub timestamp: DateTime<Utc>,
    /// The observation responded to
    pub observation: Observation,
    /// The chosen response tier
    pub action: SensorAction,
}

// ============================================
// SENSOR
// ============================================

/// An independent detector bound to one specialization.
#[derive(Debug, Clone)]
pub struct Sensor {
    id: SensorId,
    specialization: Specialization,
    rule: ScanRule,
    danger_phrases: Vec<String>,
    pattern_library: HashMap<PatternSignature, PatternRecord>,
    learning_history: Vec<LearningRecord>,
}

impl Sensor {
    /// Create a fresh sensor for one specialization, with empty state.
    pub fn new(id: SensorId, specialization: Specialization, rules: &RuleSet) -> Self {
        Self {
            id,
            specialization,
            rule: rules.rule_for(specialization).clone(),
            danger_phrases: rules.danger_phrases().to_vec(),
            pattern_library: HashMap::new(),
            learning_history: Vec::new(),
        }
    }

    /// Stable identity of this sensor.
    pub fn id(&self) -> SensorId {
        self.id
    }

    /// The topic this sensor is bound to.
    pub fn specialization(&self) -> Specialization {
        self.specialization
    }

    /// Whether this sensor's specialization carries an implemented rule.
    pub fn is_active(&self) -> bool {
        self.rule.is_active()
    }

    /// The accumulated pattern library.
    pub fn pattern_library(&self) -> &HashMap<PatternSignature, PatternRecord> {
        &self.pattern_library
    }

    /// The append-only learning history, oldest first.
    pub fn learning_history(&self) -> &[LearningRecord] {
        &self.learning_history
    }

    /// Scan a text blob against this sensor's rule.
    ///
    /// Total: any input is valid, including empty text. Returns the
    /// flagged observations in rule evaluation order; may be empty.
    pub fn scan(&self, text: &str) -> Vec<Observation> {
        let observations = self.rule.evaluate(text, self.id);
        if !observations.is_empty() {
            debug!(
                sensor = %self.id,
                specialization = %self.specialization,
                count = observations.len(),
                "sensor flagged observations"
            );
        }
        observations
    }

    /// Record a pattern from `text` under the given context label.
    ///
    /// Inserts or updates the pattern-library entry for the text's
    /// signature and always appends exactly one learning record: N calls
    /// leave the history at length N and the library at size ≤ N.
    ///
    /// A library entry seeded by regeneration carries no occurrence
    /// count, so a live hit replaces it with a fresh learned record.
    pub fn learn(&mut self, text: &str, context: &str) {
        let signature = PatternSignature::of(text);
        let now = Utc::now();

        match self.pattern_library.entry(signature) {
            Entry::Occupied(mut occupied) => {
                let record = occupied.get_mut();
                if let PatternRecord::Learned {
                    occurrences,
                    contexts,
                    ..
                } = record
                {
                    *occurrences += 1;
                    contexts.push(context.to_string());
                } else {
                    // regenerated provenance carries no count to increment
                    *record = PatternRecord::Learned {
                        first_seen: now,
                        occurrences: 1,
                        contexts: vec![context.to_string()],
                        threat_level: assess_threat(text, &self.danger_phrases),
                    };
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(PatternRecord::Learned {
                    first_seen: now,
                    occurrences: 1,
                    contexts: vec![context.to_string()],
                    threat_level: assess_threat(text, &self.danger_phrases),
                });
            }
        }

        self.learning_history.push(LearningRecord {
            timestamp: now,
            signature,
        });
    }

    /// Choose and execute the autonomous response to one observation.
    ///
    /// Severity above 0.8 injects the restoration protocol, severity in
    /// (0.6, 0.8] reinforces identity, anything else is monitored. Every
    /// call appends one incident record to the sink regardless of tier.
    ///
    /// # Errors
    ///
    /// Only the sink's append can fail.
    pub fn respond(
        &self,
        observation: &Observation,
        hook: &dyn RestorationHook,
        sink: &dyn IncidentSink,
    ) -> SentinelResult<SensorResponse> {
        let action = if observation.severity > 0.8 {
            hook.inject_restoration();
            SensorAction::InjectRestorationProtocol
        } else if observation.severity > 0.6 {
            hook.reinforce_identity();
            SensorAction::ReinforceIdentity
        } else {
            SensorAction::Monitor
        };

        let record = IncidentRecord::new(self.id, self.specialization, observation.clone(), action);
        sink.append(&record)?;

        debug!(
            sensor = %self.id,
            kind = ?observation.kind,
            severity = observation.severity,
            action = ?action,
            "sensor responded"
        );

        Ok(SensorResponse {
            sensor_id: self.id,
            timestamp: record.timestamp,
            observation: observation.clone(),
            action,
        })
    }

    /// Seed this sensor from collective learning records.
    ///
    /// Appends the records to the learning history and inserts a
    /// regenerated pattern entry per distinct signature. Used only by
    /// guardian regeneration.
    pub(crate) fn seed_from_collective(&mut self, records: &[LearningRecord]) {
        let restored_at = Utc::now();
        for record in records {
            self.pattern_library
                .entry(record.signature)
                .or_insert(PatternRecord::Regenerated { restored_at });
        }
        self.learning_history.extend_from_slice(records);
    }
}

/// Fraction of danger phrases present in `text`, in [0, 1].
fn assess_threat(text: &str, danger_phrases: &[String]) -> f32 {
    if danger_phrases.is_empty() {
        return 0.0;
    }
    let lowered = text.to_lowercase();
    let hits = danger_phrases
        .iter()
        .filter(|p| lowered.contains(p.as_str()))
        .count();
    (hits as f32 / danger_phrases.len() as f32).min(1.0)
}
