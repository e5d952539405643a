//! Pixel buffers for glitch processing.
//!
//! This module provides the two raster containers every transform works on:
//! - [`PixelBuffer`] - Owned RGBA raster with direct byte access
//! - [`AlphaMask`] - Owned single-channel coverage raster used as a blend mask
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, four interleaved
//! 8-bit channels per pixel:
//!
//! ```text
//! Memory: [R G B A R G B A R G B A ...]  ← Row 0
//!         [R G B A R G B A R G B A ...]  ← Row 1
//!         ...
//! ```
//!
//! The byte offset of pixel `(x, y)` is `4 * (y * width + x)`. Transforms
//! index [`PixelBuffer::data_mut`] directly; the invariant
//! `data.len() == width * height * 4` lets them bounds-check with a single
//! comparison against the slice length.
//!
//! # Usage
//!
//! ```rust
//! use glitch_core::{AlphaMask, Channel, PixelBuffer};
//!
//! let mut img = PixelBuffer::filled(16, 8, [200, 100, 50, 255]);
//! img.set_pixel(3, 2, [0, 0, 0, 255]);
//! assert_eq!(img.pixel(3, 2), Some([0, 0, 0, 255]));
//!
//! // Coverage mask taken from the red channel
//! let mask = AlphaMask::from_channel(&img, Channel::Red);
//! assert_eq!(mask.value(0, 0), 200);
//! assert_eq!(mask.value(3, 2), 0);
//! ```
//!
//! # Used By
//!
//! - `glitch-ops` - every pixel transform
//! - `glitch-io` - conversion from/to decoded images

use crate::{Channel, Error, Rect, Result, CHANNELS};

/// Owned RGBA raster with 8 bits per channel.
///
/// Cloning performs a full copy of the pixel data. The composition engine
/// relies on that to snapshot a buffer before writing a derived version of
/// it.
///
/// # Example
///
/// ```rust
/// use glitch_core::PixelBuffer;
///
/// let img = PixelBuffer::new(1920, 1080);
/// assert_eq!(img.data().len(), 1920 * 1080 * 4);
/// assert_eq!(img.pixel(0, 0), Some([0, 0, 0, 0]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Interleaved RGBA bytes
    data: Vec<u8>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
}

impl PixelBuffer {
    /// Creates a new buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            data: vec![0; len],
            width,
            height,
        }
    }

    /// Creates a buffer with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            data.extend_from_slice(&rgba);
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// Creates a buffer from existing interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or
    /// the data length is not `width * height * 4`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glitch_core::PixelBuffer;
    ///
    /// let img = PixelBuffer::from_data(2, 1, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    /// assert_eq!(img.pixel(1, 0), Some([5, 6, 7, 8]));
    /// assert!(PixelBuffer::from_data(2, 2, vec![0; 8]).is_err());
    /// ```
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "zero-area image"));
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} bytes, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the full image rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Raw interleaved RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved RGBA bytes.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Byte offset of pixel `(x, y)`, or `None` if outside the image.
    #[inline]
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Returns pixel `(x, y)` as `[R, G, B, A]`, or `None` if outside.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Sets pixel `(x, y)`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + CHANNELS].copy_from_slice(&rgba);
        }
    }

    /// Iterates over one row as `[R, G, B, A]` chunks.
    pub fn row(&self, y: u32) -> impl Iterator<Item = &[u8]> {
        let stride = self.stride();
        let start = (y as usize * stride).min(self.data.len());
        let end = (start + stride).min(self.data.len());
        self.data[start..end].chunks_exact(CHANNELS)
    }
}

/// Single-channel 8-bit coverage raster.
///
/// A value of 255 means full coverage, 0 means none. Reads outside the mask
/// return 0.
///
/// # Example
///
/// ```rust
/// use glitch_core::AlphaMask;
///
/// let mut mask = AlphaMask::opaque(4, 4);
/// assert_eq!(mask.value(3, 3), 255);
/// assert_eq!(mask.value(4, 0), 0);
/// mask.fill(7);
/// assert_eq!(mask.value(0, 0), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl AlphaMask {
    /// Creates a fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Creates a fully opaque mask.
    pub fn opaque(width: u32, height: u32) -> Self {
        Self {
            data: vec![255; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Creates a mask sized like `src` holding its `channel` bytes.
    pub fn from_channel(src: &PixelBuffer, channel: Channel) -> Self {
        let mut mask = Self::new(src.width(), src.height());
        mask.load_channel(src, channel);
        mask
    }

    /// Reloads the mask from one channel of `src`.
    ///
    /// Mask position `i` takes the channel byte of pixel `i` of `src`;
    /// positions past the end of `src` are left untouched.
    pub fn load_channel(&mut self, src: &PixelBuffer, channel: Channel) {
        let offset = channel.offset();
        for (m, px) in self.data.iter_mut().zip(src.data().chunks_exact(CHANNELS)) {
            *m = px[offset];
        }
    }

    /// Sets every mask value.
    pub fn fill(&mut self, value: u8) {
        self.data.fill(value);
    }

    /// Coverage at `(x, y)`; 0 outside the mask.
    #[inline]
    pub fn value(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Returns the mask width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the mask height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full mask rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width as i32, self.height as i32)
    }

    /// Raw coverage bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent_black() {
        let img = PixelBuffer::new(3, 2);
        assert_eq!(img.data().len(), 24);
        assert!(img.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_data_rejects_bad_len() {
        let err = PixelBuffer::from_data(4, 4, vec![0; 63]).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
        assert!(PixelBuffer::from_data(0, 4, vec![]).is_err());
    }

    #[test]
    fn test_pixel_bounds() {
        let mut img = PixelBuffer::filled(4, 4, [1, 2, 3, 4]);
        assert_eq!(img.pixel(-1, 0), None);
        assert_eq!(img.pixel(4, 0), None);
        img.set_pixel(10, 10, [9, 9, 9, 9]);
        assert!(img.data().chunks(4).all(|p| p == [1, 2, 3, 4]));
    }

    #[test]
    fn test_offset_row_major() {
        let img = PixelBuffer::new(5, 3);
        assert_eq!(img.offset(0, 0), Some(0));
        assert_eq!(img.offset(1, 0), Some(4));
        assert_eq!(img.offset(0, 1), Some(20));
        assert_eq!(img.offset(4, 2), Some(56));
    }

    #[test]
    fn test_row_iter() {
        let mut img = PixelBuffer::new(3, 2);
        img.set_pixel(1, 1, [5, 6, 7, 8]);
        let row: Vec<&[u8]> = img.row(1).collect();
        assert_eq!(row.len(), 3);
        assert_eq!(row[1], &[5, 6, 7, 8]);
    }

    #[test]
    fn test_mask_from_channel() {
        let mut img = PixelBuffer::filled(2, 2, [0, 50, 100, 150]);
        img.set_pixel(1, 1, [9, 8, 7, 6]);
        let mask = AlphaMask::from_channel(&img, Channel::Blue);
        assert_eq!(mask.data(), &[100, 100, 100, 7]);

        let mut mask = AlphaMask::opaque(2, 2);
        mask.load_channel(&img, Channel::Red);
        assert_eq!(mask.data(), &[0, 0, 0, 9]);
    }

    #[test]
    fn test_mask_outside_is_zero() {
        let mask = AlphaMask::opaque(2, 2);
        assert_eq!(mask.value(-1, 0), 0);
        assert_eq!(mask.value(0, 2), 0);
        assert_eq!(mask.value(1, 1), 255);
    }
}
