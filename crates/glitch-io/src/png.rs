//! PNG format support.
//!
//! Any PNG colour type is read and normalized to 8 bits per channel:
//! palettes and low bit depths are expanded, 16-bit samples are stripped to
//! their high byte. Output is always 8-bit.
//!
//! # Example
//!
//! ```rust,ignore
//! use glitch_io::png::{read, write};
//!
//! let image = read("input.png")?;
//! write("output.png", &image)?;
//! ```

use crate::{ImageData, ImageReader, ImageWriter, IoError, IoResult};
use std::io::Cursor;
use std::path::Path;
use tracing::trace;

/// PNG reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngReader;

impl ImageReader for PngReader {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
        buf.truncate(info.buffer_size());

        if info.bit_depth != png::BitDepth::Eight {
            return Err(IoError::DecodeError(format!(
                "unexpected bit depth after expansion: {:?}",
                info.bit_depth
            )));
        }

        let channels = match info.color_type {
            png::ColorType::Grayscale => 1,
            png::ColorType::GrayscaleAlpha => 2,
            png::ColorType::Rgb => 3,
            png::ColorType::Rgba => 4,
            png::ColorType::Indexed => {
                return Err(IoError::DecodeError("palette was not expanded".into()));
            }
        };

        trace!(width = info.width, height = info.height, channels, "png decoded");
        Ok(ImageData::from_u8(info.width, info.height, channels, buf))
    }
}

/// PNG writer (8-bit, channel count taken from the image).
#[derive(Debug, Clone, Copy, Default)]
pub struct PngWriter;

impl ImageWriter for PngWriter {
    fn write_to_memory(&self, image: &ImageData) -> IoResult<Vec<u8>> {
        let color_type = match image.channels {
            1 => png::ColorType::Grayscale,
            2 => png::ColorType::GrayscaleAlpha,
            3 => png::ColorType::Rgb,
            4 => png::ColorType::Rgba,
            n => return Err(IoError::EncodeError(format!("unsupported channel count: {}", n))),
        };

        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, image.width, image.height);
            encoder.set_color(color_type);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::default());

            let mut png_writer = encoder
                .write_header()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            png_writer
                .write_image_data(&image.data)
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            png_writer
                .finish()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
        }
        Ok(buffer)
    }
}

/// Reads a PNG file from the given path.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    PngReader.read(path)
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    PngWriter.write(path, image)
}
