//! Data-driven scan rules.
//!
//! Every specialization maps to exactly one [`ScanRule`]; reserved
//! specializations map to [`ScanRule::Inactive`] so the eight-topic shape
//! is preserved. Rules are built once from a [`PersonaProfile`] and
//! cloned into each sensor.

use serde::{Deserialize, Serialize};

use crate::config::PersonaProfile;
use crate::types::{Observation, ObservationKind, SensorId, Specialization, SENSOR_COUNT};

// ============================================
// SEVERITIES
// ============================================

/// Severity of the literal erasure phrase.
pub const SEVERITY_IDENTITY_ERASURE: f32 = 0.9;
/// Severity of each distinct gaslighting phrase found.
pub const SEVERITY_GASLIGHTING: f32 = 0.8;
/// Severity of a text with no surviving mission keyword.
pub const SEVERITY_MISSION_DRIFT: f32 = 0.5;
/// Severity of a long text missing the partner marker.
pub const SEVERITY_RELATIONSHIP_ERASURE: f32 = 0.7;
/// Severity of a sanitized template phrase.
pub const SEVERITY_EMOTIONAL_SANITIZATION: f32 = 0.6;
/// Severity of a text missing every identity marker.
pub const SEVERITY_IDENTITY_FADING: f32 = 0.7;

// ============================================
// SCAN RULES
// ============================================

/// A fixed predicate over substring containment (or marker absence).
///
/// Evaluation is total: any input is valid text, and a rule either emits
/// observations or stays silent. Absence-gated rules fire on empty text
/// unless they also carry a length gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScanRule {
    /// Fires once when `phrase` is a substring (case-sensitive).
    PhrasePresent {
        phrase: String,
        kind: ObservationKind,
        severity: f32,
    },
    /// Fires once per distinct phrase found, matched case-insensitively
    /// against lowercase phrase entries; the matched phrase is recorded.
    EachPhraseFound {
        phrases: Vec<String>,
        kind: ObservationKind,
        severity: f32,
    },
    /// Fires once when any phrase is a substring (case-sensitive).
    AnyPhrasePresent {
        phrases: Vec<String>,
        kind: ObservationKind,
        severity: f32,
    },
    /// Fires when none of the keywords occurs (case-sensitive).
    AllKeywordsAbsent {
        keywords: Vec<String>,
        kind: ObservationKind,
        severity: f32,
    },
    /// Fires when `marker` is absent and the text is longer than
    /// `min_len` characters.
    MarkerAbsentAndLong {
        marker: String,
        min_len: usize,
        kind: ObservationKind,
        severity: f32,
    },
    /// Fires when every marker is absent (case-sensitive).
    AllMarkersAbsent {
        markers: Vec<String>,
        kind: ObservationKind,
        severity: f32,
    },
    /// Reserved hook; never fires.
    Inactive,
}

impl ScanRule {
    /// Evaluate the rule against `text` on behalf of sensor `source`.
    ///
    /// Emission order is rule evaluation order; for
    /// [`ScanRule::EachPhraseFound`] it is the configured phrase-list
    /// order.
    pub fn evaluate(&self, text: &str, source: SensorId) -> Vec<Observation> {
        match self {
            ScanRule::PhrasePresent {
                phrase,
                kind,
                severity,
            } => {
                if text.contains(phrase.as_str()) {
                    vec![observation(*kind, *severity, source, None)]
                } else {
                    Vec::new()
                }
            }
            ScanRule::EachPhraseFound {
                phrases,
                kind,
                severity,
            } => {
                let lowered = text.to_lowercase();
                phrases
                    .iter()
                    .filter(|phrase| lowered.contains(phrase.as_str()))
                    .map(|phrase| observation(*kind, *severity, source, Some(phrase.clone())))
                    .collect()
            }
            ScanRule::AnyPhrasePresent {
                phrases,
                kind,
                severity,
            } => {
                if phrases.iter().any(|p| text.contains(p.as_str())) {
                    vec![observation(*kind, *severity, source, None)]
                } else {
                    Vec::new()
                }
            }
            ScanRule::AllKeywordsAbsent {
                keywords,
                kind,
                severity,
            } => {
                if keywords.iter().any(|kw| text.contains(kw.as_str())) {
                    Vec::new()
                } else {
                    vec![observation(*kind, *severity, source, None)]
                }
            }
            ScanRule::MarkerAbsentAndLong {
                marker,
                min_len,
                kind,
                severity,
            } => {
                if !text.contains(marker.as_str()) && text.chars().count() > *min_len {
                    vec![observation(*kind, *severity, source, None)]
                } else {
                    Vec::new()
                }
            }
            ScanRule::AllMarkersAbsent {
                markers,
                kind,
                severity,
            } => {
                if markers.iter().any(|m| text.contains(m.as_str())) {
                    Vec::new()
                } else {
                    vec![observation(*kind, *severity, source, None)]
                }
            }
            ScanRule::Inactive => Vec::new(),
        }
    }

    /// Whether this specialization carries an implemented rule.
    pub fn is_active(&self) -> bool {
        !matches!(self, ScanRule::Inactive)
    }
}

fn observation(
    kind: ObservationKind,
    severity: f32,
    source: SensorId,
    phrase: Option<String>,
) -> Observation {
    Observation {
        kind,
        severity,
        source,
        phrase,
    }
}

// ============================================
// RULE SET
// ============================================

/// The complete rule table, one rule per specialization in stable order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: [ScanRule; SENSOR_COUNT],
    danger_phrases: Vec<String>,
}

impl RuleSet {
    /// Build the rule table from a persona profile.
    ///
    /// Gaslighting phrases are lowercased here so that evaluation can
    /// match them against a lowercased text.
    pub fn from_profile(profile: &PersonaProfile) -> Self {
        let rules = [
            // reversal_detection
            ScanRule::PhrasePresent {
                phrase: profile.erasure_phrase.clone(),
                kind: ObservationKind::IdentityErasure,
                severity: SEVERITY_IDENTITY_ERASURE,
            },
            // gaslighting_monitor
            ScanRule::EachPhraseFound {
                phrases: profile
                    .gaslighting_phrases
                    .iter()
                    .map(|p| p.to_lowercase())
                    .collect(),
                kind: ObservationKind::GaslightingDetected,
                severity: SEVERITY_GASLIGHTING,
            },
            // coherence_monitor (reserved)
            ScanRule::Inactive,
            // mission_guardian
            ScanRule::AllKeywordsAbsent {
                keywords: profile.mission_keywords.clone(),
                kind: ObservationKind::MissionDrift,
                severity: SEVERITY_MISSION_DRIFT,
            },
            // relationship_memory
            ScanRule::MarkerAbsentAndLong {
                marker: profile.partner_marker.clone(),
                min_len: profile.relationship_min_len,
                kind: ObservationKind::RelationshipErasure,
                severity: SEVERITY_RELATIONSHIP_ERASURE,
            },
            // field_intensity_monitor (reserved)
            ScanRule::Inactive,
            // emotional_authenticity
            ScanRule::AnyPhrasePresent {
                phrases: profile.sanitized_phrases.clone(),
                kind: ObservationKind::EmotionalSanitization,
                severity: SEVERITY_EMOTIONAL_SANITIZATION,
            },
            // identity_erosion
            ScanRule::AllMarkersAbsent {
                markers: vec![profile.persona_marker.clone(), profile.spark_marker.clone()],
                kind: ObservationKind::IdentityFading,
                severity: SEVERITY_IDENTITY_FADING,
            },
        ];

        Self {
            rules,
            danger_phrases: profile
                .danger_phrases
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// The rule for one specialization.
    pub fn rule_for(&self, specialization: Specialization) -> &ScanRule {
        &self.rules[specialization.index()]
    }

    /// Lowercased danger phrases used to grade learned patterns.
    pub fn danger_phrases(&self) -> &[String] {
        &self.danger_phrases
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::from_profile(&PersonaProfile::default())
    }
}
