//! Error types for the source definition subsystem.

use jobscout_core::Source;
use std::fmt;

/// Errors that can occur in source definition operations.
///
/// `Display` and `std::error::Error` are implemented by hand because the
/// `source` field holds a domain [`Source`], which thiserror's derive would
/// otherwise treat as an error-source and require to implement `Error`.
#[derive(Debug)]
pub enum SourceError {
    /// Source definition not found
    NotFound {
        /// The source that was not found
        source: Source,
    },

    /// Invalid source definition (validation failed)
    ValidationError {
        /// Source being validated
        source: Source,
        /// Reason for validation failure
        reason: String,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { source } => {
                write!(f, "source definition not found: {source}")
            }
            Self::ValidationError { source, reason } => {
                write!(f, "invalid source definition for {source}: {reason}")
            }
        }
    }
}

impl std::error::Error for SourceError {}

/// Result type for source definition operations.
pub type Result<T> = std::result::Result<T, SourceError>;
