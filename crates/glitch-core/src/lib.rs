//! # glitch-core
//!
//! Core types for glitch image processing.
//!
//! This crate provides the foundational types used throughout glitch-rs:
//!
//! - [`PixelBuffer`] - RGBA raster with direct per-pixel byte access
//! - [`AlphaMask`] - Single-channel coverage raster used as a blend mask
//! - [`Rect`], [`Point`] - Signed regions and offsets for masked blits
//! - [`Channel`] - The closed set of RGBA channels
//!
//! ## Design Philosophy
//!
//! Transforms work on flat, channel-interleaved byte buffers and index them
//! directly. There is no typed colour view between an algorithm and its
//! bytes; every transform bounds-checks its own index arithmetic and skips
//! out-of-range accesses instead of failing.
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other glitch-rs crates
//! depend on `glitch-core`:
//!
//! ```text
//! glitch-core (this crate)
//!    ^
//!    |
//!    +-- glitch-ops (dithering, displacement, composition)
//!    +-- glitch-io (PNG/JPEG/GIF codecs)
//!    +-- glitch-cli (the `glitch` binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;
pub mod rect;

// Re-exports for convenience
pub use error::*;
pub use image::*;
pub use pixel::{luma, Channel, CHANNELS};
pub use rect::*;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use glitch_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::{AlphaMask, PixelBuffer};
    pub use crate::pixel::{luma, Channel};
    pub use crate::rect::{Point, Rect};
}
