//! Error types for glitch operations.

use thiserror::Error;

/// Error type for glitch operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error raised by a core buffer operation.
    #[error(transparent)]
    Core(#[from] glitch_core::Error),
}

/// Result type for glitch operations.
pub type OpsResult<T> = Result<T, OpsError>;
