//! Error types for sentinel-core.
//!
//! The core is total by design: malformed text is treated as plain text,
//! short histories degrade to an unknown assessment, and empty scans
//! yield a continue decision. The failures that remain are sensor-index
//! violations during regeneration, threshold misconfiguration, and I/O
//! on the flat-file sinks.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type SentinelResult<T> = Result<T, SentinelError>;

/// Central error type for sentinel-core.
#[derive(Debug, Error)]
pub enum SentinelError {
    /// Regeneration was requested for an id outside the fixed sensor range.
    #[error("invalid sensor index {index} (sensor count is {len})")]
    InvalidSensorIndex {
        /// The offending index
        index: usize,
        /// Number of sensors in the fixed collection
        len: usize,
    },

    /// Threshold configuration is out of order or out of range.
    #[error("invalid thresholds: {reason}")]
    InvalidThresholds {
        /// Why validation rejected the configuration
        reason: String,
    },

    /// Flat-file sink or reader failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Record (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
