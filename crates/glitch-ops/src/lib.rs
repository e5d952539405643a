//! # glitch-ops
//!
//! Pixel transforms and the randomized composition engine.
//!
//! This crate turns a [`glitch_core::PixelBuffer`] into a glitched copy of
//! itself: dithered, torn into shifted bands, channel-swapped and
//! re-composited, all driven by one seeded random stream.
//!
//! # Modules
//!
//! - [`random`] - Seeded random stream
//! - [`dither`] - Eight-bit, Bayer, halftone, Atkinson, Floyd–Steinberg
//! - [`channel`] - Single-channel copies
//! - [`composite`] - Masked Src/Over compositing
//! - [`wrap`] - Horizontal band rotation
//! - [`filter`] - Brightness and scanlines
//! - [`glitch`] - Transform catalog, pool, and the `glitchify` pipeline
//!
//! # Example
//!
//! ```rust
//! use glitch_core::PixelBuffer;
//! use glitch_ops::{glitchify, GlitchOptions, RandomSource};
//!
//! let input = PixelBuffer::filled(64, 48, [40, 120, 220, 255]);
//! let mut rng = RandomSource::from_seed_str("my-host");
//! let output = glitchify(&input, &GlitchOptions::default(), &mut rng);
//! assert_eq!(output.dimensions(), (64, 48));
//! ```
//!
//! # Features
//!
//! - `parallel` - Row-parallel post filters via rayon
//!
//! ## Dithering on its own
//!
//! ```rust
//! use glitch_core::PixelBuffer;
//! use glitch_ops::dither::{atkinson, ErrorMode};
//!
//! let mut img = PixelBuffer::filled(16, 16, [128, 64, 200, 255]);
//! atkinson(&mut img, 127, ErrorMode::Clamped);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod channel;
pub mod composite;
pub mod dither;
pub mod filter;
pub mod glitch;
pub mod random;
pub mod wrap;

pub use composite::{BlendOp, Mask};
pub use dither::ErrorMode;
pub use error::{OpsError, OpsResult};
pub use glitch::{glitch_frames, glitchify, GlitchOptions, Strategy};
pub use random::RandomSource;
