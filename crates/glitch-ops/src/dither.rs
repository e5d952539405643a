//! Dithering algorithms.
//!
//! Five independent algorithms that push a buffer's RGB channels towards
//! pure black/white. All of them work in place and leave alpha untouched.
//!
//! # Algorithms
//!
//! - [`eight_bit`] - 4×4 block average, thresholded per channel
//! - [`bayer`] - 4×4 ordered dither on luma (grayscale result)
//! - [`halftone`] - 3×3 cells with a growing dot whose size encodes brightness
//! - [`atkinson`] - error diffusion to six neighbours, 1/8 each
//! - [`floyd_steinberg`] - error diffusion to four neighbours, 7/3/5/1 sixteenths
//!
//! # Addressing
//!
//! Block and cell samples are addressed through the flat buffer index
//! `4 * (width * y + x)`. A sample past the right edge therefore lands at
//! the start of the next row, and only samples past the end of the buffer
//! are skipped. Edge blocks are still averaged over the full block size, so
//! partial blocks at the bottom edge read darker than their contents.
//!
//! # Example
//!
//! ```rust
//! use glitch_core::PixelBuffer;
//! use glitch_ops::dither::{floyd_steinberg, ErrorMode};
//!
//! let mut img = PixelBuffer::filled(32, 32, [90, 160, 220, 255]);
//! floyd_steinberg(&mut img, 127, ErrorMode::Wrapping);
//! assert!(img.data().chunks(4).all(|p| p[..3].iter().all(|&c| c == 0 || c == 255)));
//! ```

use glitch_core::{PixelBuffer, CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Block edge length of the eight-bit dither.
const BLOCK: usize = 4;

/// Ordered threshold matrix, indexed `[x % 4][y % 4]`.
const BAYER_4X4: [[f64; 4]; 4] = [
    [1.0, 9.0, 3.0, 11.0],
    [13.0, 5.0, 15.0, 7.0],
    [4.0, 12.0, 2.0, 10.0],
    [16.0, 8.0, 14.0, 6.0],
];

/// Halftone cell edge length.
const CELL: usize = 3;

/// Order in which halftone cell positions are darkened as brightness drops.
///
/// Positions are row-major within the 3×3 cell; the centre goes first.
const DOT_ORDER: [usize; 9] = [4, 5, 1, 6, 3, 8, 2, 0, 7];

/// Arithmetic used when redistributing quantization error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// 8-bit wraparound on the error term and on the neighbour update.
    ///
    /// A channel thresholded up to white yields a large positive wrapped
    /// error instead of a negative one, which feeds bright streaks into the
    /// neighbours. This is the tool's reference behaviour.
    #[default]
    Wrapping,
    /// Signed error; neighbour updates are clamped to `[0, 255]`.
    Clamped,
}

impl std::fmt::Display for ErrorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wrapping => f.write_str("wrapping"),
            Self::Clamped => f.write_str("clamped"),
        }
    }
}

#[inline]
fn binarize(value: u8, threshold: u8) -> u8 {
    if value > threshold { 0xff } else { 0x00 }
}

/// Eight-bit block dither.
///
/// Splits the image into 4×4 blocks, averages each channel over the block
/// (sum / 16) and writes `0xFF` to every pixel of the block when the average
/// exceeds `threshold`, `0x00` otherwise.
///
/// # Example
///
/// ```rust
/// use glitch_core::PixelBuffer;
/// use glitch_ops::dither::eight_bit;
///
/// let mut img = PixelBuffer::filled(8, 8, [100, 200, 50, 255]);
/// eight_bit(&mut img, 99);
/// assert_eq!(img.pixel(5, 5), Some([255, 255, 0, 255]));
/// ```
pub fn eight_bit(buf: &mut PixelBuffer, threshold: i32) {
    trace!(threshold, "dither::eight_bit");
    let width = buf.width() as usize;
    let height = buf.height() as usize;
    let data = buf.data_mut();
    let len = data.len();
    let block_area = (BLOCK * BLOCK) as i64;

    for y in (0..height).step_by(BLOCK) {
        for x in (0..width).step_by(BLOCK) {
            let mut sum = [0i64; 3];
            for sy in 0..BLOCK {
                for sx in 0..BLOCK {
                    let i = CHANNELS * (width * (y + sy) + (x + sx));
                    if i >= len {
                        continue;
                    }
                    sum[0] += data[i] as i64;
                    sum[1] += data[i + 1] as i64;
                    sum[2] += data[i + 2] as i64;
                }
            }

            let avg = sum.map(|s| {
                if s / block_area > threshold as i64 { 0xff } else { 0x00 }
            });

            for sy in 0..BLOCK {
                for sx in 0..BLOCK {
                    let i = CHANNELS * (width * (y + sy) + (x + sx));
                    if i >= len {
                        continue;
                    }
                    data[i..i + 3].copy_from_slice(&avg);
                }
            }
        }
    }
}

/// Bayer ordered dither.
///
/// Converts each pixel to luma, scales it to `[0, 17)` and compares it
/// against the 4×4 threshold matrix (entries 1..=16). Output is grayscale:
/// all three channels are set to the same pure black or white.
pub fn bayer(buf: &mut PixelBuffer) {
    trace!("dither::bayer");
    let width = buf.width() as usize;
    let height = buf.height() as usize;
    let data = buf.data_mut();

    for y in 0..height {
        for x in 0..width {
            let i = CHANNELS * (y * width + x);
            let gray = glitch_core::luma(data[i], data[i + 1], data[i + 2]);
            let scaled = (gray * 17.0) / 255.0;
            let val = if scaled > BAYER_4X4[x % 4][y % 4] { 0xff } else { 0x00 };
            data[i] = val;
            data[i + 1] = val;
            data[i + 2] = val;
        }
    }
}

/// Halftone dither over 3×3 cells.
///
/// Each cell is averaged per channel and thresholded to a binary colour.
/// The cell is then painted white and re-darkened with that colour, one
/// position at a time in [`DOT_ORDER`], until `9 - fill` positions carry it,
/// where `fill = floor(lum * 9 / 255 + 0.5)`.
///
/// The luminance sums the three channel bytes with 8-bit wraparound before
/// dividing by three. Cells start at `x, y = 0, 3, 6, …` while
/// `x <= width - 2` (resp. height); a trailing one-pixel margin is left as is.
pub fn halftone(buf: &mut PixelBuffer, threshold: u16) {
    trace!(threshold, "dither::halftone");
    let width = buf.width() as usize;
    let height = buf.height() as usize;
    let data = buf.data_mut();
    let len = data.len();
    let threshold = threshold as u32;

    let mut y = 0;
    while y + 2 <= height {
        let mut x = 0;
        while x + 2 <= width {
            let mut sum = [0u32; 3];
            let mut cell: [Option<usize>; CELL * CELL] = [None; CELL * CELL];

            for sy in 0..CELL {
                for sx in 0..CELL {
                    let i = CHANNELS * (width * (y + sy) + (x + sx));
                    if i >= len {
                        continue;
                    }
                    sum[0] += data[i] as u32;
                    sum[1] += data[i + 1] as u32;
                    sum[2] += data[i + 2] as u32;
                    data[i..i + 3].fill(0xff);
                    cell[sy * CELL + sx] = Some(i);
                }
            }

            let avg = sum.map(|s| if s / 9 > threshold { 0xffu8 } else { 0x00 });
            let lum = avg[0].wrapping_add(avg[1]).wrapping_add(avg[2]) as f64 / 3.0;
            let fill = ((lum * 9.0) / 255.0 + 0.5).floor();

            for (k, &pos) in DOT_ORDER.iter().enumerate() {
                if fill < (9 - k) as f64 {
                    if let Some(i) = cell[pos] {
                        data[i..i + 3].copy_from_slice(&avg);
                    }
                }
            }

            x += CELL;
        }
        y += CELL;
    }
}

/// Adds `weight * error` to the RGB bytes at `i`, skipping indices past the
/// end of the buffer.
#[inline]
fn diffuse(data: &mut [u8], i: usize, old: [u8; 3], new: [u8; 3], weight: f64, mode: ErrorMode) {
    if i + 2 >= data.len() {
        return;
    }
    for c in 0..3 {
        data[i + c] = match mode {
            ErrorMode::Wrapping => {
                let err = old[c].wrapping_sub(new[c]);
                data[i + c].wrapping_add((weight * err as f64) as u8)
            }
            ErrorMode::Clamped => {
                let err = old[c] as i32 - new[c] as i32;
                let adj = (weight * err as f64) as i32;
                (data[i + c] as i32 + adj).clamp(0, 255) as u8
            }
        };
    }
}

/// Thresholds the pixel at `i` in place and returns `(old, new)`.
#[inline]
fn quantize(data: &mut [u8], i: usize, threshold: u8) -> ([u8; 3], [u8; 3]) {
    let old = [data[i], data[i + 1], data[i + 2]];
    let new = old.map(|v| binarize(v, threshold));
    data[i..i + 3].copy_from_slice(&new);
    (old, new)
}

/// Atkinson error-diffusion dither.
///
/// Each channel becomes white when it exceeds `threshold`. The quantization
/// error is spread 1/8 each to six not-yet-visited pixels:
///
/// ```text
///        *   1/8  1/8
///   1/8 1/8  ...  1/8     <- the second 1/8 on this row sits at x+2
///       1/8
/// ```
///
/// i.e. `(x+1, y)`, `(x+2, y)`, `(x-1, y+1)`, `(x, y+1)`, `(x+2, y+1)` and
/// `(x, y+2)`. Only 6/8 of the error is propagated.
pub fn atkinson(buf: &mut PixelBuffer, threshold: u8, mode: ErrorMode) {
    trace!(threshold, %mode, "dither::atkinson");
    let width = buf.width() as usize;
    let height = buf.height() as usize;
    let row = width * CHANNELS;
    let data = buf.data_mut();
    const W: f64 = 1.0 / 8.0;

    for y in 0..height {
        for x in 0..width {
            let i = CHANNELS * (y * width + x);
            let (old, new) = quantize(data, i, threshold);

            if x + 1 < width {
                diffuse(data, i + 4, old, new, W, mode);
                if y + 1 < height {
                    diffuse(data, i + row + 8, old, new, W, mode);
                }
                if x + 2 < width {
                    diffuse(data, i + 8, old, new, W, mode);
                }
            }
            if y + 1 < height {
                diffuse(data, i + row, old, new, W, mode);
                if x > 0 {
                    diffuse(data, i + row - 4, old, new, W, mode);
                }
                if y + 2 < height {
                    diffuse(data, i + 2 * row, old, new, W, mode);
                }
            }
        }
    }
}

/// Floyd–Steinberg error-diffusion dither.
///
/// ```text
///       *   7
///   3   5   1      (sixteenths)
/// ```
pub fn floyd_steinberg(buf: &mut PixelBuffer, threshold: u8, mode: ErrorMode) {
    trace!(threshold, %mode, "dither::floyd_steinberg");
    let width = buf.width() as usize;
    let height = buf.height() as usize;
    let row = width * CHANNELS;
    let data = buf.data_mut();

    for y in 0..height {
        for x in 0..width {
            let i = CHANNELS * (y * width + x);
            let (old, new) = quantize(data, i, threshold);

            if x + 1 < width {
                diffuse(data, i + 4, old, new, 7.0 / 16.0, mode);
                if y + 1 < height {
                    diffuse(data, i + row + 4, old, new, 1.0 / 16.0, mode);
                }
            }
            if y + 1 < height {
                diffuse(data, i + row, old, new, 5.0 / 16.0, mode);
                if x > 0 {
                    diffuse(data, i + row - 4, old, new, 3.0 / 16.0, mode);
                }
            }
        }
    }
}
