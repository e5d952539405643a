//! Error types for glitch-core operations.
//!
//! Pixel transforms never fail: every index computation is bounds-checked and
//! out-of-range accesses are skipped. Errors only arise when a buffer is
//! *constructed* from caller-provided data that violates the RGBA layout
//! invariant.
//!
//! # Usage
//!
//! ```rust
//! use glitch_core::{Error, PixelBuffer};
//!
//! let err = PixelBuffer::from_data(4, 4, vec![0u8; 10]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building glitch-core buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, or the supplied data length
    /// does not equal `width * height * channels`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
