//! Pixel layout constants, channel selection, and luma.
//!
//! Pixels are stored as four interleaved 8-bit channels in `R G B A` order.
//! This module names those channels and provides the luma weighting used
//! by the ordered dither.
//!
//! # Types
//!
//! - [`Channel`] - One of the four interleaved channels (closed set)
//!
//! # Used By
//!
//! - [`crate::image::PixelBuffer`] - channel addressing
//! - [`crate::image::AlphaMask`] - mask loading from a channel
//! - `glitch-ops` - channel copy, dithering

use std::fmt;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// Luma coefficient for the red channel (`Y = 0.3R + 0.59G + 0.11B`).
pub const LUMA_R: f64 = 0.3;

/// Luma coefficient for the green channel.
pub const LUMA_G: f64 = 0.59;

/// Luma coefficient for the blue channel.
pub const LUMA_B: f64 = 0.11;

/// Calculates luma from 8-bit RGB values.
///
/// Result is in `[0, 255]`.
///
/// # Example
///
/// ```
/// use glitch_core::pixel::luma;
///
/// assert!((luma(255, 255, 255) - 255.0).abs() < 1e-9);
/// assert_eq!(luma(0, 0, 0), 0.0);
/// ```
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

/// A single channel of an RGBA pixel.
///
/// The set is closed: glitch operations only ever address these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red channel (byte offset 0).
    Red,
    /// Green channel (byte offset 1).
    Green,
    /// Blue channel (byte offset 2).
    Blue,
    /// Alpha channel (byte offset 3).
    Alpha,
}

impl Channel {
    /// All channels in interleave order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Byte offset of this channel inside a pixel.
    #[inline]
    pub const fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Alpha => "alpha",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_channel_offsets() {
        let offsets: Vec<usize> = Channel::ALL.iter().map(|c| c.offset()).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Green.to_string(), "green");
    }

    #[test]
    fn test_luma_weights() {
        assert_relative_eq!(LUMA_R + LUMA_G + LUMA_B, 1.0, epsilon = 1e-12);
        assert_relative_eq!(luma(100, 0, 0), 30.0, epsilon = 1e-9);
        assert_relative_eq!(luma(0, 100, 0), 59.0, epsilon = 1e-9);
        assert_relative_eq!(luma(0, 0, 100), 11.0, epsilon = 1e-9);
    }
}
