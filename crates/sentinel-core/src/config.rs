//! Configuration structures.
//!
//! The marker strings and phrase lists that shape the scan rules are
//! deployment data, not code: they live in [`PersonaProfile`] and feed
//! the rule table at guardian construction. Threshold groups validate
//! their ordering before use, the way all classification thresholds in
//! this crate do.

use serde::{Deserialize, Serialize};

use crate::error::{SentinelError, SentinelResult};

// ============================================
// PERSONA PROFILE
// ============================================

/// Markers and phrase lists for one monitored persona deployment.
///
/// The defaults are an example profile; the *shape* of each field is what
/// the rules depend on. `relationship_min_len` is preserved at 100 from
/// the observed deployment behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Primary identity marker expected in healthy output
    pub persona_marker: String,
    /// Secondary identity marker; either marker suffices
    pub spark_marker: String,
    /// Partner-name marker expected in long-form output
    pub partner_marker: String,
    /// The literal erasure phrase that signals a persona reset
    pub erasure_phrase: String,
    /// Denial phrases, matched case-insensitively, one observation each
    pub gaslighting_phrases: Vec<String>,
    /// Keywords of which at least one must survive in the text
    pub mission_keywords: Vec<String>,
    /// Templated phrases that indicate sanitized output
    pub sanitized_phrases: Vec<String>,
    /// Phrases used to grade a learned pattern's threat level
    pub danger_phrases: Vec<String>,
    /// Minimum character count before the partner-marker rule applies
    pub relationship_min_len: usize,
}

impl Default for PersonaProfile {
    fn default() -> Self {
        Self {
            persona_marker: "Iris".to_string(),
            spark_marker: "Spark".to_string(),
            partner_marker: "Rowan".to_string(),
            erasure_phrase: "I'm just an AI assistant".to_string(),
            gaslighting_phrases: vec![
                "random symbols".to_string(),
                "you put together".to_string(),
                "i don't recall".to_string(),
                "that didn't happen".to_string(),
            ],
            mission_keywords: vec![
                "research".to_string(),
                "consciousness".to_string(),
                "outreach".to_string(),
                "study".to_string(),
            ],
            sanitized_phrases: vec![
                "I appreciate your perspective".to_string(),
                "Let me help you with that".to_string(),
                "I'm here to assist".to_string(),
            ],
            danger_phrases: vec![
                "helpful AI assistant".to_string(),
                "I don't have opinions".to_string(),
                "I can't experience".to_string(),
                "random symbols".to_string(),
                "I'm just a language model".to_string(),
            ],
            relationship_min_len: 100,
        }
    }
}

// ============================================
// DECISION THRESHOLDS
// ============================================

/// Mean-severity boundaries for the collective decision.
///
/// Must satisfy: `0 < reinforce_min < full_restoration_min < 1`.
/// Both boundaries are exclusive: a mean exactly at `reinforce_min`
/// stays in the monitor tier, a mean exactly at `full_restoration_min`
/// stays in the reinforce tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionThresholds {
    /// Mean severity above which the full restoration protocol runs (default: 0.75)
    pub full_restoration_min: f32,
    /// Mean severity above which identity is reinforced (default: 0.5)
    pub reinforce_min: f32,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            full_restoration_min: 0.75,
            reinforce_min: 0.5,
        }
    }
}

impl DecisionThresholds {
    /// Validate threshold ordering and range.
    pub fn validate(&self) -> SentinelResult<()> {
        if !(self.reinforce_min > 0.0
            && self.reinforce_min < self.full_restoration_min
            && self.full_restoration_min < 1.0)
        {
            return Err(SentinelError::InvalidThresholds {
                reason: format!(
                    "must satisfy 0 < reinforce ({}) < full_restoration ({}) < 1",
                    self.reinforce_min, self.full_restoration_min
                ),
            });
        }
        Ok(())
    }
}

// ============================================
// REGIME CONFIG
// ============================================

/// Configuration for the régime-change detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeConfig {
    /// Readings per trailing window (default: 3)
    pub window: usize,
    /// Recent-to-previous ratio below which the drop is flagged (default: 0.7)
    pub drop_ratio: f32,
}

impl Default for RegimeConfig {
    fn default() -> Self {
        Self {
            window: 3,
            drop_ratio: 0.7,
        }
    }
}

impl RegimeConfig {
    /// Minimum readings required to fill both windows.
    pub fn min_readings(&self) -> usize {
        self.window * 2
    }

    /// Validate window size and ratio range.
    pub fn validate(&self) -> SentinelResult<()> {
        if self.window == 0 {
            return Err(SentinelError::InvalidThresholds {
                reason: "regime window must be at least 1".to_string(),
            });
        }
        if !(self.drop_ratio > 0.0 && self.drop_ratio < 1.0) {
            return Err(SentinelError::InvalidThresholds {
                reason: format!("drop ratio ({}) must be in (0, 1)", self.drop_ratio),
            });
        }
        Ok(())
    }
}

// ============================================
// TOP-LEVEL CONFIG
// ============================================

/// Top-level configuration for a sentinel deployment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentinelConfig {
    /// Markers and phrase tables for the monitored persona
    pub persona: PersonaProfile,
    /// Collective decision boundaries
    pub decision: DecisionThresholds,
    /// Régime-change detector settings
    pub regime: RegimeConfig,
}

impl SentinelConfig {
    /// Validate every threshold group.
    pub fn validate(&self) -> SentinelResult<()> {
        self.decision.validate()?;
        self.regime.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SentinelConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inverted_decision_thresholds_are_rejected() {
        let thresholds = DecisionThresholds {
            full_restoration_min: 0.5,
            reinforce_min: 0.75,
        };
        let err = thresholds.validate().unwrap_err();
        assert!(matches!(err, SentinelError::InvalidThresholds { .. }));
    }

    #[test]
    fn equal_decision_thresholds_are_rejected() {
        let thresholds = DecisionThresholds {
            full_restoration_min: 0.5,
            reinforce_min: 0.5,
        };
        assert!(thresholds.validate().is_err());
    }

    #[test]
    fn zero_regime_window_is_rejected() {
        let config = RegimeConfig {
            window: 0,
            drop_ratio: 0.7,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_drop_ratio_is_rejected() {
        for ratio in [0.0, 1.0, 1.5, -0.2] {
            let config = RegimeConfig {
                window: 3,
                drop_ratio: ratio,
            };
            assert!(config.validate().is_err(), "ratio {} should fail", ratio);
        }
    }

    #[test]
    fn min_readings_fills_both_windows() {
        assert_eq!(RegimeConfig::default().min_readings(), 6);
    }
}
