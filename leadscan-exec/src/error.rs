//! Error types for leadscan-exec
//!
//! Recoverable pipeline conditions (rejected candidates, absent channels,
//! field conflicts) are data, not errors. These variants cover invalid input
//! and broken record invariants only.

use thiserror::Error;

/// Extraction pipeline error
#[derive(Debug, Error)]
pub enum ExecError {
    /// Confidence outside [0.0, 1.0]
    #[error("Confidence out of range: {0}")]
    InvalidConfidence(f64),

    /// Populated field with no source backing it
    #[error("Field value '{0}' has no provenance")]
    MissingProvenance(String),

    /// Discovery channel setup failure
    #[error("Channel error: {0}")]
    Channel(String),

    /// leadscan-common error (configuration, I/O)
    #[error("Common error: {0}")]
    Common(#[from] leadscan_common::Error),
}

/// Result type for the extraction pipeline
pub type ExecResult<T> = Result<T, ExecError>;
