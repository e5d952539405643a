//! JPEG format support.
//!
//! # Architecture
//!
//! - [`JpegReader`] - decodes RGB, grayscale and CMYK files to 8-bit RGB
//! - [`JpegWriter`] - encodes RGB, configured via [`JpegWriterOptions`]
//!
//! Alpha is dropped on write; JPEG has no alpha channel.
//!
//! # Example
//!
//! ```rust,ignore
//! use glitch_io::jpeg::{JpegWriter, JpegWriterOptions};
//! use glitch_io::ImageWriter;
//!
//! let writer = JpegWriter::with_options(JpegWriterOptions { quality: 95 });
//! writer.write("highq.jpg", &image)?;
//! ```

use crate::{ImageData, ImageReader, ImageWriter, IoError, IoResult};
use std::io::{BufReader, Cursor};
use std::path::Path;
use tracing::trace;

/// Default encoder quality.
pub const DEFAULT_QUALITY: u8 = 75;

/// Options for writing JPEG files.
#[derive(Debug, Clone)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Higher = better quality, larger files.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
        }
    }
}

/// JPEG file reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegReader;

impl ImageReader for JpegReader {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(Cursor::new(data)));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;

        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = info.width as u32;
        let height = info.height as u32;

        let rgb: Vec<u8> = match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => pixels,
            jpeg_decoder::PixelFormat::L8 => pixels.iter().flat_map(|&g| [g, g, g]).collect(),
            jpeg_decoder::PixelFormat::L16 => {
                // high byte
                pixels.chunks(2).flat_map(|l16| [l16[0], l16[0], l16[0]]).collect()
            }
            jpeg_decoder::PixelFormat::CMYK32 => pixels
                .chunks(4)
                .flat_map(|cmyk| {
                    let c = cmyk[0] as f32 / 255.0;
                    let m = cmyk[1] as f32 / 255.0;
                    let y = cmyk[2] as f32 / 255.0;
                    let k = cmyk[3] as f32 / 255.0;

                    let r = ((1.0 - c) * (1.0 - k) * 255.0) as u8;
                    let g = ((1.0 - m) * (1.0 - k) * 255.0) as u8;
                    let b = ((1.0 - y) * (1.0 - k) * 255.0) as u8;

                    [r, g, b]
                })
                .collect(),
        };

        trace!(width, height, format = ?info.pixel_format, "jpeg decoded");
        Ok(ImageData::from_u8(width, height, 3, rgb))
    }
}

/// JPEG file writer.
///
/// # Example
///
/// ```rust,ignore
/// use glitch_io::jpeg::{JpegWriter, JpegWriterOptions};
/// use glitch_io::ImageWriter;
///
/// let preview_writer = JpegWriter::with_options(JpegWriterOptions { quality: 60 });
/// preview_writer.write("preview.jpg", &image)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

impl JpegWriter {
    /// Creates a new writer with default options (quality 75).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with custom options.
    pub fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }
}

impl ImageWriter for JpegWriter {
    fn write_to_memory(&self, image: &ImageData) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let (width, height) = match (u16::try_from(image.width), u16::try_from(image.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(IoError::EncodeError(format!(
                    "{}x{} exceeds the JPEG size limit",
                    image.width, image.height
                )));
            }
        };

        let rgb: Vec<u8> = match image.channels {
            4 => image
                .data
                .chunks(4)
                .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
                .collect(),
            3 => image.data.clone(),
            2 => image.data.chunks(2).flat_map(|ga| [ga[0], ga[0], ga[0]]).collect(),
            1 => image.data.iter().flat_map(|&g| [g, g, g]).collect(),
            n => {
                return Err(IoError::EncodeError(format!("unsupported channel count: {}", n)));
            }
        };

        let quality = self.options.quality.clamp(1, 100);
        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, quality);
        encoder
            .encode(&rgb, width, height, ColorType::Rgb)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

        Ok(buffer)
    }
}

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    JpegReader.read(path)
}

/// Writes a JPEG file with default options (quality 75).
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    JpegWriter::new().write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> ImageData {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 8) as u8, (y * 8) as u8, 128, 255]);
            }
        }
        ImageData::from_u8(width, height, 4, data)
    }

    #[test]
    fn test_roundtrip() {
        let image = gradient(32, 24);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");

        write(&path, &image).expect("Write failed");
        let loaded = read(&path).expect("Read failed");

        assert_eq!(loaded.width, 32);
        assert_eq!(loaded.height, 24);
        assert_eq!(loaded.channels, 3);
    }

    #[test]
    fn test_quality_affects_size() {
        let image = gradient(64, 64);
        let low = JpegWriter::with_options(JpegWriterOptions { quality: 10 })
            .write_to_memory(&image)
            .unwrap();
        let high = JpegWriter::with_options(JpegWriterOptions { quality: 100 })
            .write_to_memory(&image)
            .unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_rejects_bad_channel_count() {
        let image = ImageData::from_u8(1, 1, 5, vec![0; 5]);
        assert!(JpegWriter::new().write_to_memory(&image).is_err());
    }
}
