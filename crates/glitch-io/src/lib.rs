//! # glitch-io
//!
//! Image I/O for the glitch tool.
//!
//! Reads and writes the three formats the tool accepts:
//!
//! - **PNG** - Lossless with alpha support
//! - **JPEG** - Lossy, quality setting, no alpha
//! - **GIF** - First frame on read; still or looping animation on write
//!
//! # Architecture
//!
//! - [`ImageReader`] - Trait for format readers
//! - [`ImageWriter`] - Trait for format writers
//! - [`read`] / [`write`] - High-level functions with format auto-detection
//! - [`ImageData`] - Decoded 8-bit samples, converted to and from
//!   [`glitch_core::PixelBuffer`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use glitch_io::{read, write};
//!
//! let image = read("input.jpg")?;
//! let pixels = image.to_pixel_buffer()?;
//! write("output.png", &glitch_io::ImageData::from_pixel_buffer(&pixels))?;
//! ```
//!
//! # Format Selection
//!
//! Input format is detected from magic bytes, falling back to the file
//! extension. Output format is chosen by extension only; anything other
//! than `png`, `jpg`/`jpeg` or `gif` is rejected.
//!
//! # Feature Flags
//!
//! - `png` - PNG support (default)
//! - `jpeg` - JPEG support (default)
//! - `gif` - GIF support via the `image` crate (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
mod traits;

#[cfg(feature = "png")]
pub mod png;

#[cfg(feature = "jpeg")]
pub mod jpeg;

#[cfg(feature = "gif")]
pub mod gif;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use traits::{ImageReader, ImageWriter};

use glitch_core::{PixelBuffer, CHANNELS};
use std::path::Path;
use tracing::debug;

/// Options applied when writing.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// JPEG quality, 1-100.
    pub jpeg_quality: u8,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self { jpeg_quality: 75 }
    }
}

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Reads an image from a file, auto-detecting the format.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The format is not supported
/// - The file is corrupted
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let format = match Format::from_bytes(&data) {
        Format::Unknown => Format::from_extension(path),
        known => known,
    };
    debug!(path = %path.display(), %format, "reading image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::PngReader.read_from_memory(&data),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegReader.read_from_memory(&data),

        #[cfg(feature = "gif")]
        Format::Gif => gif::GifReader.read_from_memory(&data),

        _ => Err(unsupported(path)),
    }
}

/// Writes an image to a file with default options, format by extension.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    write_with_options(path, image, &WriteOptions::default())
}

/// Writes an image to a file, format by extension.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] for extensions other than
/// `png`, `jpg`, `jpeg` and `gif`, or an encode/I/O error.
pub fn write_with_options<P: AsRef<Path>>(
    path: P,
    image: &ImageData,
    options: &WriteOptions,
) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    debug!(path = %path.display(), %format, "writing image");

    match format {
        #[cfg(feature = "png")]
        Format::Png => png::PngWriter.write(path, image),

        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegWriter::with_options(jpeg::JpegWriterOptions {
            quality: options.jpeg_quality,
        })
        .write(path, image),

        #[cfg(feature = "gif")]
        Format::Gif => gif::GifWriter.write(path, image),

        _ => Err(unsupported(path)),
    }
}

/// Decoded image: interleaved 8-bit samples.
///
/// `channels` is 1 (gray), 2 (gray + alpha), 3 (RGB) or 4 (RGBA).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Number of interleaved channels.
    pub channels: u32,
    /// Raw samples, row-major.
    pub data: Vec<u8>,
}

impl ImageData {
    /// Creates ImageData from u8 pixel data.
    pub fn from_u8(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Wraps a pixel buffer as RGBA image data.
    pub fn from_pixel_buffer(buf: &PixelBuffer) -> Self {
        Self::from_u8(buf.width(), buf.height(), CHANNELS as u32, buf.data().to_vec())
    }

    /// Returns the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Expands the samples to RGBA. Missing alpha becomes 255.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidFile`] if the channel count is not 1-4 or
    /// the sample count does not match the dimensions.
    pub fn to_rgba(&self) -> IoResult<Vec<u8>> {
        let expected = self.pixel_count() * self.channels as usize;
        if self.data.len() != expected {
            return Err(IoError::InvalidFile(format!(
                "expected {} samples for {}x{}x{}, got {}",
                expected,
                self.width,
                self.height,
                self.channels,
                self.data.len()
            )));
        }

        let rgba = match self.channels {
            4 => self.data.clone(),
            3 => self.data.chunks(3).flat_map(|p| [p[0], p[1], p[2], 255]).collect(),
            2 => self.data.chunks(2).flat_map(|p| [p[0], p[0], p[0], p[1]]).collect(),
            1 => self.data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
            n => {
                return Err(IoError::InvalidFile(format!("unsupported channel count: {}", n)));
            }
        };
        Ok(rgba)
    }

    /// Converts to an RGBA pixel buffer.
    pub fn to_pixel_buffer(&self) -> IoResult<PixelBuffer> {
        Ok(PixelBuffer::from_data(self.width, self.height, self.to_rgba()?)?)
    }
}
