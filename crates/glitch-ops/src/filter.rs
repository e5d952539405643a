//! Post-processing filters applied after composition.
//!
//! - [`brightness`] - Linear RGB gain, clamped at white
//! - [`scanlines`] - Opaque black on every even row
//!
//! Both are per-pixel and draw no random numbers. With the `parallel`
//! feature they run row-parallel via rayon; results are identical either
//! way.
//!
//! # Example
//!
//! ```rust
//! use glitch_core::PixelBuffer;
//! use glitch_ops::filter::{brightness, scanlines};
//!
//! let mut img = PixelBuffer::filled(4, 4, [100, 200, 250, 128]);
//! brightness(&mut img, 10.0);
//! assert_eq!(img.pixel(1, 1), Some([110, 220, 255, 128]));
//!
//! scanlines(&mut img);
//! assert_eq!(img.pixel(1, 0), Some([0, 0, 0, 255]));
//! ```

use glitch_core::{PixelBuffer, CHANNELS};
use tracing::trace;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Opaque black written by [`scanlines`].
const SCANLINE: [u8; 4] = [0, 0, 0, 255];

#[inline]
fn brighten(v: u8, gain: f64) -> u8 {
    (v as f64 * gain).min(255.0) as u8
}

#[inline]
fn brighten_pixel(px: &mut [u8], gain: f64) {
    px[0] = brighten(px[0], gain);
    px[1] = brighten(px[1], gain);
    px[2] = brighten(px[2], gain);
}

/// Multiplies R, G and B by `1 + factor / 100`.
///
/// Results are clamped to 255 and truncated. Alpha is untouched. A factor
/// of 0 leaves the buffer unchanged.
#[cfg(not(feature = "parallel"))]
pub fn brightness(buf: &mut PixelBuffer, factor: f64) {
    trace!(factor, "filter::brightness");
    let gain = 1.0 + factor / 100.0;
    for px in buf.data_mut().chunks_exact_mut(CHANNELS) {
        brighten_pixel(px, gain);
    }
}

/// Multiplies R, G and B by `1 + factor / 100`.
///
/// Results are clamped to 255 and truncated. Alpha is untouched. A factor
/// of 0 leaves the buffer unchanged.
#[cfg(feature = "parallel")]
pub fn brightness(buf: &mut PixelBuffer, factor: f64) {
    trace!(factor, "filter::brightness (parallel)");
    let gain = 1.0 + factor / 100.0;
    let stride = buf.stride();
    buf.data_mut().par_chunks_mut(stride).for_each(|row| {
        for px in row.chunks_exact_mut(CHANNELS) {
            brighten_pixel(px, gain);
        }
    });
}

/// Paints rows 0, 2, 4, … opaque black.
#[cfg(not(feature = "parallel"))]
pub fn scanlines(buf: &mut PixelBuffer) {
    trace!("filter::scanlines");
    let stride = buf.stride();
    for row in buf.data_mut().chunks_exact_mut(stride).step_by(2) {
        for px in row.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&SCANLINE);
        }
    }
}

/// Paints rows 0, 2, 4, … opaque black.
#[cfg(feature = "parallel")]
pub fn scanlines(buf: &mut PixelBuffer) {
    trace!("filter::scanlines (parallel)");
    let stride = buf.stride();
    buf.data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .filter(|(y, _)| y % 2 == 0)
        .for_each(|(_, row)| {
            for px in row.chunks_exact_mut(CHANNELS) {
                px.copy_from_slice(&SCANLINE);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_zero_is_identity() {
        let mut img = PixelBuffer::filled(5, 3, [12, 130, 255, 77]);
        let before = img.clone();
        brightness(&mut img, 0.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_brightness_clamps_and_truncates() {
        let mut img = PixelBuffer::filled(2, 2, [3, 200, 255, 10]);
        brightness(&mut img, 50.0);
        // 3 * 1.5 = 4.5 -> 4
        assert_eq!(img.pixel(0, 0), Some([4, 255, 255, 10]));
    }

    #[test]
    fn test_brightness_never_darkens() {
        let mut img = PixelBuffer::new(16, 1);
        for x in 0..16 {
            img.set_pixel(x, 0, [(x * 16) as u8, 0, 0, 255]);
        }
        let before = img.clone();
        brightness(&mut img, 5.0);
        for (a, b) in img.data().iter().zip(before.data()) {
            assert!(a >= b);
        }
    }

    #[test]
    fn test_scanlines_even_rows() {
        let mut img = PixelBuffer::filled(3, 5, [9, 9, 9, 9]);
        scanlines(&mut img);
        for y in 0..5 {
            let px = img.pixel(1, y).unwrap();
            if y % 2 == 0 {
                assert_eq!(px, [0, 0, 0, 255]);
            } else {
                assert_eq!(px, [9, 9, 9, 9]);
            }
        }
    }

    #[test]
    fn test_scanlines_single_row() {
        let mut img = PixelBuffer::filled(4, 1, [200, 200, 200, 200]);
        scanlines(&mut img);
        assert!(img.data().chunks(4).all(|p| p == [0, 0, 0, 255]));
    }
}
