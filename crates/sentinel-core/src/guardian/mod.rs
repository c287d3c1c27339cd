//! Collective text monitoring: sensors, rules, and the guardian.
//!
//! A [`Guardian`] owns eight [`Sensor`]s, one per
//! [`crate::types::Specialization`], in a stable order. Scanning fans a
//! text blob sequentially across every sensor and concatenates whatever
//! each one flags; [`Guardian::decide`] then maps the mean observation
//! severity to a [`crate::types::GuardAction`]. A compromised sensor can
//! be regenerated in place, seeded from the other sensors' accumulated
//! learning.

mod aggregator;
mod rules;
mod sensor;


pub use aggregator::Guardian;
pub use rules::{
    RuleSet, ScanRule, SEVERITY_EMOTIONAL_SANITIZATION, SEVERITY_GASLIGHTING,
    SEVERITY_IDENTITY_ERASURE, SEVERITY_IDENTITY_FADING, SEVERITY_MISSION_DRIFT,
    SEVERITY_RELATIONSHIP_ERASURE,
};
pub use sensor::{
    LearningRecord, PatternRecord, PatternSignature, Sensor, SensorResponse,
};
