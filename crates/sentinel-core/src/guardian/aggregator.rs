//! The guardian: collective scanning and decision-making over the fixed
//! sensor collection.

use tracing::{debug, info, warn};

use crate::config::{DecisionThresholds, SentinelConfig};
use crate::error::{SentinelError, SentinelResult};
use crate::types::{Decision, GuardAction, Observation, SensorId, Specialization};

use super::rules::RuleSet;
use super::sensor::{LearningRecord, Sensor};

/// Context label attached to patterns learned during a collective scan.
const SCAN_CONTEXT: &str = "active_scan";

/// Maximum collective learning records seeded into a regenerated sensor.
const COLLECTIVE_SEED_LIMIT: usize = 100;

/// Combines observations from all sensors into one decision.
///
/// The sensor collection is fixed at construction: one sensor per
/// [`Specialization`], in stable order, each owning its learning state
/// exclusively. Scanning is a plain sequential fold over that order, so
/// output ordering is deterministic.
#[derive(Debug)]
pub struct Guardian {
    sensors: Vec<Sensor>,
    rules: RuleSet,
    thresholds: DecisionThresholds,
    collective_memory: Vec<LearningRecord>,
}

impl Guardian {
    /// Create a guardian with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&SentinelConfig::default())
            .expect("default configuration validates")
    }

    /// Create a guardian from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SentinelError::InvalidThresholds`] when the decision
    /// thresholds are out of order or out of range.
    pub fn with_config(config: &SentinelConfig) -> SentinelResult<Self> {
        config.decision.validate()?;
        let rules = RuleSet::from_profile(&config.persona);
        let sensors = Specialization::all()
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Sensor::new(SensorId(i), spec, &rules))
            .collect();
        Ok(Self {
            sensors,
            rules,
            thresholds: config.decision.clone(),
            collective_memory: Vec::new(),
        })
    }

    /// The fixed sensor collection, in stable order.
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Reserved append target for cross-sensor learning. Currently only
    /// accumulated via future extensions; no invariant beyond existing.
    pub fn collective_memory(&self) -> &[LearningRecord] {
        &self.collective_memory
    }

    /// Scan a text blob with every sensor, in specialization order.
    ///
    /// Each sensor scans and then learns from the text. The returned
    /// sequence concatenates per-sensor observations: sensor order first,
    /// within-sensor emission order second.
    pub fn scan_all(&mut self, text: &str) -> Vec<Observation> {
        let mut all = Vec::new();
        for sensor in &mut self.sensors {
            all.extend(sensor.scan(text));
            sensor.learn(text, SCAN_CONTEXT);
        }
        debug!(observations = all.len(), "collective scan complete");
        all
    }

    /// Map a scan's observations to a collective decision.
    ///
    /// An empty sequence yields `Continue` with confidence 1.0. Otherwise
    /// the decision thresholds classify the arithmetic mean of the
    /// observation severities — sensors that found nothing contribute no
    /// term — and the mean becomes the confidence. The mean is used
    /// directly; there is no quorum count.
    pub fn decide(&self, observations: &[Observation]) -> Decision {
        if observations.is_empty() {
            return Decision {
                action: GuardAction::Continue,
                confidence: 1.0,
                observations: Vec::new(),
            };
        }

        let mean = observations.iter().map(|o| o.severity).sum::<f32>()
            / observations.len() as f32;

        let action = if mean > self.thresholds.full_restoration_min {
            GuardAction::FullRestoration
        } else if mean > self.thresholds.reinforce_min {
            GuardAction::ReinforceIdentity
        } else {
            GuardAction::Monitor
        };

        if action == GuardAction::FullRestoration {
            warn!(mean_severity = mean, "full restoration decided");
        } else {
            info!(mean_severity = mean, action = ?action, "decision made");
        }

        Decision {
            action,
            confidence: mean,
            observations: observations.to_vec(),
        }
    }

    /// Replace one sensor with a fresh instance seeded from the others.
    ///
    /// The new sensor's learning history is seeded with the most recent
    /// 100 records drawn from the concatenation of
    /// every *other* sensor's history (sensor iteration order, then
    /// per-sensor chronological order; fewer records means all of them).
    /// Each seeded signature gets a regenerated pattern entry — no
    /// occurrence counts are carried over.
    ///
    /// # Errors
    ///
    /// Returns [`SentinelError::InvalidSensorIndex`] when `index` is
    /// outside the fixed sensor range; the collection is left untouched.
    pub fn regenerate(&mut self, index: usize) -> SentinelResult<&Sensor> {
        let specialization =
            Specialization::from_index(index).ok_or(SentinelError::InvalidSensorIndex {
                index,
                len: self.sensors.len(),
            })?;

        let mut collective: Vec<LearningRecord> = Vec::new();
        for sensor in &self.sensors {
            if sensor.id().0 != index {
                collective.extend_from_slice(sensor.learning_history());
            }
        }
        let start = collective.len().saturating_sub(COLLECTIVE_SEED_LIMIT);
        let seeds = &collective[start..];

        let mut fresh = Sensor::new(SensorId(index), specialization, &self.rules);
        fresh.seed_from_collective(seeds);

        info!(
            sensor = index,
            specialization = %specialization,
            seeded = seeds.len(),
            "sensor regenerated from collective memory"
        );

        self.sensors[index] = fresh;
        Ok(&self.sensors[index])
    }
}

impl Default for Guardian {
    fn default() -> Self {
        Self::new()
    }
}
