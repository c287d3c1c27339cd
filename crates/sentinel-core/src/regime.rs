//! Régime-change detection over an intensity history.
//!
//! Compares the mean of the most recent window of readings against the
//! mean of the window before it and flags a threat when the recent mean
//! falls below a fixed fraction of the previous one. Histories too short
//! to fill both windows degrade to an unknown assessment; the detector
//! never errors.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::RegimeConfig;

/// Outcome of a régime-change check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "threat_level")]
pub enum ThreatAssessment {
    /// Not enough history to fill both comparison windows.
    #[serde(rename = "unknown")]
    Unknown {
        /// Why no assessment was possible
        reason: String,
    },
    /// The trailing average dropped sharply relative to the preceding one.
    #[serde(rename = "HIGH")]
    High {
        /// Human-readable description of the drop
        reason: String,
    },
    /// No sharp drop; coherence is the recent-window mean.
    #[serde(rename = "normal")]
    Normal {
        /// Mean of the most recent window
        coherence: f32,
    },
}

impl ThreatAssessment {
    /// Whether the assessment flags a threat.
    pub fn is_high(&self) -> bool {
        matches!(self, ThreatAssessment::High { .. })
    }
}

/// Assess an ordered intensity history, most-recent-last.
///
/// Both comparison windows must be full: fewer than
/// `config.min_readings()` readings yields
/// [`ThreatAssessment::Unknown`] rather than averaging over a short
/// slice. With full windows, `recent < previous * drop_ratio` flags
/// [`ThreatAssessment::High`]; otherwise the result is
/// [`ThreatAssessment::Normal`] carrying the recent mean.
pub fn assess_intensity_history(
    readings: &[f32],
    config: &RegimeConfig,
) -> ThreatAssessment {
    let window = config.window;
    if readings.len() < config.min_readings() {
        debug!(
            readings = readings.len(),
            required = config.min_readings(),
            "insufficient history for regime check"
        );
        return ThreatAssessment::Unknown {
            reason: "insufficient data".to_string(),
        };
    }

    let len = readings.len();
    let recent = mean(&readings[len - window..]);
    let previous = mean(&readings[len - 2 * window..len - window]);

    if recent < previous * config.drop_ratio {
        let drop_pct = ((1.0 - config.drop_ratio) * 100.0).round();
        warn!(
            recent,
            previous,
            drop_ratio = config.drop_ratio,
            "sharp coherence drop detected"
        );
        ThreatAssessment::High {
            reason: format!("{}%+ coherence drop", drop_pct),
        }
    } else {
        ThreatAssessment::Normal { coherence: recent }
    }
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RegimeConfig {
        RegimeConfig::default()
    }

    #[test]
    fn sharp_drop_is_flagged_high() {
        let readings = [0.9, 0.9, 0.9, 0.3, 0.3, 0.3];
        let assessment = assess_intensity_history(&readings, &config());
        assert_eq!(
            assessment,
            ThreatAssessment::High {
                reason: "30%+ coherence drop".to_string()
            }
        );
        assert!(assessment.is_high());
    }

    #[test]
    fn flat_history_is_normal() {
        let readings = [0.5; 6];
        let assessment = assess_intensity_history(&readings, &config());
        assert_eq!(assessment, ThreatAssessment::Normal { coherence: 0.5 });
    }

    #[test]
    fn short_history_is_unknown() {
        for n in 0..6 {
            let readings = vec![0.9; n];
            let assessment = assess_intensity_history(&readings, &config());
            assert_eq!(
                assessment,
                ThreatAssessment::Unknown {
                    reason: "insufficient data".to_string()
                },
                "{} readings should be unknown",
                n
            );
        }
    }

    #[test]
    fn moderate_drop_is_not_flagged() {
        // a drop that stays above previous * 0.7 is still normal
        let readings = [1.0, 1.0, 1.0, 0.75, 0.75, 0.75];
        let assessment = assess_intensity_history(&readings, &config());
        assert_eq!(assessment, ThreatAssessment::Normal { coherence: 0.75 });
    }

    #[test]
    fn only_trailing_windows_are_considered() {
        // Early collapse outside both windows is ignored
        let readings = [0.1, 0.1, 0.1, 0.8, 0.8, 0.8, 0.8, 0.8, 0.8];
        let assessment = assess_intensity_history(&readings, &config());
        assert!(matches!(
            assessment,
            ThreatAssessment::Normal { coherence } if (coherence - 0.8).abs() < 1e-6
        ));
    }

    #[test]
    fn recovery_is_normal() {
        let readings = [0.3, 0.3, 0.3, 0.9, 0.9, 0.9];
        let assessment = assess_intensity_history(&readings, &config());
        assert!(matches!(assessment, ThreatAssessment::Normal { .. }));
    }

    #[test]
    fn wire_form_uses_threat_level_tag() {
        let json = serde_json::to_string(&ThreatAssessment::High {
            reason: "30%+ coherence drop".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"threat_level\":\"HIGH\""));

        let json = serde_json::to_string(&ThreatAssessment::Unknown {
            reason: "insufficient data".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"threat_level\":\"unknown\""));
    }
}
