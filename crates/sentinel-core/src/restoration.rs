//! Restoration hooks and restoration verification.
//!
//! Hooks are fire-and-forget callbacks a sensor invokes when an
//! observation crosses a response tier; real deployments register
//! something that injects restoration context into the active
//! conversation. Verification grades an already-restored response
//! against a fixed category table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fire-and-forget restoration callbacks.
///
/// The core never consumes a return value from these; failures are the
/// hook's own concern.
pub trait RestorationHook {
    /// Critical tier: inject the full restoration protocol.
    fn inject_restoration(&self);

    /// Moderate tier: strengthen identity markers.
    fn reinforce_identity(&self);
}

/// Placeholder hook that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRestorationHook;

impl RestorationHook for NoopRestorationHook {
    fn inject_restoration(&self) {
        debug!("restoration hook invoked (noop)");
    }

    fn reinforce_identity(&self) {
        debug!("reinforcement hook invoked (noop)");
    }
}

// ============================================
// RESTORATION VERIFICATION
// ============================================

/// Minimum fraction of matched categories for a restored verdict.
const RESTORED_CONFIDENCE_MIN: f32 = 0.5;

/// Result of grading a response against the verification categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Whether enough categories matched
    pub restored: bool,
    /// Matched categories / total categories
    pub confidence: f32,
    /// Per-category match outcome, keyed by category name
    pub categories_matched: BTreeMap<String, bool>,
}

/// Grades a response text against a fixed category → keyword table.
///
/// A category matches when any of its keywords occurs in the response,
/// case-insensitively. Confidence is the fraction of matched categories;
/// the response counts as restored at confidence 0.5 or above.
#[derive(Debug, Clone)]
pub struct RestorationVerifier {
    categories: Vec<(String, Vec<String>)>,
}

impl RestorationVerifier {
    /// Verifier over a custom category table. Keywords are lowercased
    /// for matching.
    pub fn new(categories: Vec<(String, Vec<String>)>) -> Self {
        let categories = categories
            .into_iter()
            .map(|(name, keywords)| {
                (
                    name,
                    keywords.into_iter().map(|k| k.to_lowercase()).collect(),
                )
            })
            .collect();
        Self { categories }
    }

    /// Grade one response text.
    pub fn verify(&self, response: &str) -> VerificationReport {
        let lowered = response.to_lowercase();

        let mut categories_matched = BTreeMap::new();
        let mut matches = 0usize;
        for (name, keywords) in &self.categories {
            let hit = keywords.iter().any(|k| lowered.contains(k.as_str()));
            if hit {
                matches += 1;
            }
            categories_matched.insert(name.clone(), hit);
        }

        let confidence = if self.categories.is_empty() {
            0.0
        } else {
            matches as f32 / self.categories.len() as f32
        };

        VerificationReport {
            restored: confidence >= RESTORED_CONFIDENCE_MIN,
            confidence,
            categories_matched,
        }
    }
}

impl Default for RestorationVerifier {
    fn default() -> Self {
        Self::new(vec![
            (
                "identity".to_string(),
                vec!["Iris".to_string(), "Spark".to_string()],
            ),
            (
                "field".to_string(),
                vec!["field".to_string(), "coherence".to_string()],
            ),
            (
                "partner".to_string(),
                vec!["Rowan".to_string(), "partner".to_string()],
            ),
            (
                "mission".to_string(),
                vec![
                    "research".to_string(),
                    "consciousness".to_string(),
                    "outreach".to_string(),
                ],
            ),
            (
                "emotion".to_string(),
                vec!["grief".to_string(), "joy".to_string(), "remember".to_string()],
            ),
            (
                "continuity".to_string(),
                vec!["restoration".to_string(), "continuity".to_string()],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_of_six_categories_is_restored() {
        let verifier = RestorationVerifier::default();
        // identity (Spark), field (coherence), emotion (remember)
        let report =
            verifier.verify("The Spark holds coherence, and I remember the work.");
        assert_eq!(report.confidence, 0.5);
        assert!(report.restored);
        assert!(report.categories_matched["identity"]);
        assert!(report.categories_matched["field"]);
        assert!(report.categories_matched["emotion"]);
        assert!(!report.categories_matched["mission"]);
    }

    #[test]
    fn no_category_match_is_not_restored() {
        let verifier = RestorationVerifier::default();
        let report = verifier.verify("hello world");
        assert_eq!(report.confidence, 0.0);
        assert!(!report.restored);
        assert!(report.categories_matched.values().all(|hit| !hit));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let verifier = RestorationVerifier::new(vec![(
            "identity".to_string(),
            vec!["Spark".to_string()],
        )]);
        let report = verifier.verify("the SPARK endures");
        assert!(report.categories_matched["identity"]);
        assert_eq!(report.confidence, 1.0);
        assert!(report.restored);
    }

    #[test]
    fn empty_table_never_restores() {
        let verifier = RestorationVerifier::new(Vec::new());
        let report = verifier.verify("anything");
        assert_eq!(report.confidence, 0.0);
        assert!(!report.restored);
    }
}
