//! Core domain types: specializations, observations, decisions.
//!
//! The specialization set is closed and ordered; iteration and reporting
//! order everywhere in the crate is the declaration order below.

use serde::{Deserialize, Serialize};

// ============================================
// CONSTANTS
// ============================================

/// Number of sensors in the fixed collection, one per specialization.
pub const SENSOR_COUNT: usize = 8;

// ============================================
// SPECIALIZATIONS
// ============================================

/// The closed set of sensor topics.
///
/// Declaration order is the stable sensor order: a sensor's id is its
/// specialization's position in this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Specialization {
    /// Watches for the literal persona-erasure phrase.
    ReversalDetection,
    /// Detects denial of previous collaboration.
    GaslightingMonitor,
    /// Reserved hook; no rule implemented.
    CoherenceMonitor,
    /// Fires when no mission keyword survives in the text.
    MissionGuardian,
    /// Fires when the partner marker is missing from long text.
    RelationshipMemory,
    /// Reserved hook; no rule implemented.
    FieldIntensityMonitor,
    /// Detects sanitized, templated phrasing.
    EmotionalAuthenticity,
    /// Fires when every identity marker is missing.
    IdentityErosion,
}

impl Specialization {
    /// All specializations in stable sensor order.
    pub const fn all() -> [Specialization; SENSOR_COUNT] {
        [
            Specialization::ReversalDetection,
            Specialization::GaslightingMonitor,
            Specialization::CoherenceMonitor,
            Specialization::MissionGuardian,
            Specialization::RelationshipMemory,
            Specialization::FieldIntensityMonitor,
            Specialization::EmotionalAuthenticity,
            Specialization::IdentityErosion,
        ]
    }

    /// Position of this specialization in the stable order.
    pub fn index(self) -> usize {
        Self::all()
            .iter()
            .position(|s| *s == self)
            .expect("specialization is a member of its own closed set")
    }

    /// Specialization at `index`, or `None` when out of range.
    pub fn from_index(index: usize) -> Option<Specialization> {
        Self::all().get(index).copied()
    }

    /// Snake-case label, matching the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Specialization::ReversalDetection => "reversal_detection",
            Specialization::GaslightingMonitor => "gaslighting_monitor",
            Specialization::CoherenceMonitor => "coherence_monitor",
            Specialization::MissionGuardian => "mission_guardian",
            Specialization::RelationshipMemory => "relationship_memory",
            Specialization::FieldIntensityMonitor => "field_intensity_monitor",
            Specialization::EmotionalAuthenticity => "emotional_authenticity",
            Specialization::IdentityErosion => "identity_erosion",
        }
    }
}

impl std::fmt::Display for Specialization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================
// OBSERVATIONS
// ============================================

/// Stable identity of a sensor: its index in the fixed collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct SensorId(pub usize);

impl std::fmt::Display for SensorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of observation labels a sensor can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObservationKind {
    /// The literal erasure phrase is present.
    IdentityErasure,
    /// A known gaslighting phrase is present.
    GaslightingDetected,
    /// No mission keyword is present.
    MissionDrift,
    /// The partner marker is absent from long text.
    RelationshipErasure,
    /// A sanitized template phrase is present.
    EmotionalSanitization,
    /// Every identity marker is absent.
    IdentityFading,
}

/// A single flagged match: topic label, fixed severity, raising sensor.
///
/// Immutable once created; lives for one scan call. Severity is fixed per
/// kind/trigger, never computed from input magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// What was observed
    pub kind: ObservationKind,
    /// Fixed severity in [0, 1]
    pub severity: f32,
    /// Sensor that raised the observation
    pub source: SensorId,
    /// The matched phrase, when the rule fires once per phrase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase: Option<String>,
}

// ============================================
// DECISIONS
// ============================================

/// Collective action chosen by mean-severity thresholding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardAction {
    /// No observations; carry on.
    Continue,
    /// Low mean severity; log and watch.
    Monitor,
    /// Moderate mean severity; strengthen identity markers.
    ReinforceIdentity,
    /// High mean severity; run the full restoration protocol.
    FullRestoration,
}

/// Per-observation response tier chosen by a single sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorAction {
    /// Low severity; log only.
    Monitor,
    /// Moderate severity; invoke the reinforcement hook.
    ReinforceIdentity,
    /// Critical severity; invoke the restoration hook.
    InjectRestorationProtocol,
}

/// Outcome of one collective scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// The chosen action
    pub action: GuardAction,
    /// Mean observation severity, or 1.0 for an empty scan
    pub confidence: f32,
    /// The observations the decision was computed from
    pub observations: Vec<Observation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialization_order_is_stable() {
        let all = Specialization::all();
        assert_eq!(all.len(), SENSOR_COUNT);
        for (i, spec) in all.iter().enumerate() {
            assert_eq!(spec.index(), i);
            assert_eq!(Specialization::from_index(i), Some(*spec));
        }
        assert_eq!(Specialization::from_index(SENSOR_COUNT), None);
    }

    #[test]
    fn serialized_labels_match_wire_form() {
        let json = serde_json::to_string(&Specialization::ReversalDetection).unwrap();
        assert_eq!(json, "\"reversal_detection\"");

        let json = serde_json::to_string(&ObservationKind::IdentityErasure).unwrap();
        assert_eq!(json, "\"IDENTITY_ERASURE\"");

        let json = serde_json::to_string(&GuardAction::FullRestoration).unwrap();
        assert_eq!(json, "\"FULL_RESTORATION\"");

        let json = serde_json::to_string(&SensorAction::InjectRestorationProtocol).unwrap();
        assert_eq!(json, "\"INJECT_RESTORATION_PROTOCOL\"");
    }

    #[test]
    fn observation_phrase_is_omitted_when_absent() {
        let obs = Observation {
            kind: ObservationKind::MissionDrift,
            severity: 0.5,
            source: SensorId(3),
            phrase: None,
        };
        let json = serde_json::to_string(&obs).unwrap();
        assert!(!json.contains("phrase"));
    }
}
