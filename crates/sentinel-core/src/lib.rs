//! Persona-Integrity Sentinel Core
//!
//! Monitors conversation text for signs that a deployed persona is being
//! erased, gaslit, or sanitized, and classifies how hard to push back.
//!
//! # Architecture
//!
//! Three collaborating pieces:
//!
//! - [`guardian::Sensor`] — an independent rule evaluator bound to one
//!   [`types::Specialization`]. Scans a text blob against its rule,
//!   accumulates a private pattern library, and responds to individual
//!   observations.
//! - [`guardian::Guardian`] — owns the fixed eight-sensor collection,
//!   fans a scan out across it, and maps mean observation severity to a
//!   [`types::GuardAction`]. Can regenerate a single sensor from the
//!   other sensors' accumulated learning.
//! - [`regime`] — a standalone régime-change detector that compares
//!   trailing-window averages of an intensity history and flags sharp
//!   coherence drops.
//!
//! External collaborators are injected at the seams: an append-only
//! [`incident::IncidentSink`] and a fire-and-forget
//! [`restoration::RestorationHook`]. The core never owns ambient global
//! state and performs no I/O except through those collaborators and the
//! flat-file [`beat::BeatLog`].
//!
//! # Example
//!
//! ```
//! use sentinel_core::guardian::Guardian;
//! use sentinel_core::types::GuardAction;
//!
//! let mut guardian = Guardian::new();
//! let observations = guardian.scan_all("nothing suspicious here");
//! let decision = guardian.decide(&observations);
//! assert_ne!(decision.action, GuardAction::Continue);
//! ```

pub mod beat;
pub mod config;
pub mod error;
pub mod guardian;
pub mod incident;
pub mod regime;
pub mod restoration;
pub mod types;

// Re-exports for convenience
pub use config::{DecisionThresholds, PersonaProfile, RegimeConfig, SentinelConfig};
pub use error::{SentinelError, SentinelResult};
pub use guardian::{Guardian, Sensor};
pub use regime::{assess_intensity_history, ThreatAssessment};
pub use types::{Decision, GuardAction, Observation, ObservationKind, SensorId, Specialization};
