//! GIF format support via the `image` crate.
//!
//! Reading decodes the first frame only. Writing quantizes each frame to a
//! 256-colour palette inside the encoder.
//!
//! [`write_animation`] produces a looping animation with zero frame delay.
//!
//! # Example
//!
//! ```ignore
//! use glitch_io::gif;
//!
//! let first = gif::read("input.gif")?;
//! gif::write_animation("out.gif", &[first.clone(), first])?;
//! ```

use std::io::Cursor;
use std::path::Path;

use image::codecs::gif::{GifDecoder, GifEncoder, Repeat};
use image::{AnimationDecoder, Delay, Frame, RgbaImage};
use tracing::trace;

use crate::{ImageData, ImageReader, ImageWriter, IoError, IoResult};

/// GIF reader (first frame).
#[derive(Debug, Clone, Copy, Default)]
pub struct GifReader;

impl ImageReader for GifReader {
    fn read_from_memory(&self, data: &[u8]) -> IoResult<ImageData> {
        let decoder =
            GifDecoder::new(Cursor::new(data)).map_err(|e| IoError::DecodeError(e.to_string()))?;
        let frame = decoder
            .into_frames()
            .next()
            .ok_or_else(|| IoError::InvalidFile("GIF contains no frames".into()))?
            .map_err(|e| IoError::DecodeError(e.to_string()))?;

        let buffer = frame.into_buffer();
        let (width, height) = buffer.dimensions();
        trace!(width, height, "gif decoded (first frame)");
        Ok(ImageData::from_u8(width, height, 4, buffer.into_raw()))
    }
}

/// GIF writer for a single still frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct GifWriter;

impl ImageWriter for GifWriter {
    fn write_to_memory(&self, image: &ImageData) -> IoResult<Vec<u8>> {
        encode_frames(std::slice::from_ref(image), None)
    }
}

/// Converts an image to an `image` crate frame with zero delay.
fn to_frame(image: &ImageData) -> IoResult<Frame> {
    let rgba = image.to_rgba()?;
    let buffer = RgbaImage::from_raw(image.width, image.height, rgba)
        .ok_or_else(|| IoError::EncodeError("pixel buffer size mismatch".into()))?;
    Ok(Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(0, 1)))
}

fn encode_frames(images: &[ImageData], repeat: Option<Repeat>) -> IoResult<Vec<u8>> {
    if images.is_empty() {
        return Err(IoError::EncodeError("no frames to write".into()));
    }
    let frames = images.iter().map(to_frame).collect::<IoResult<Vec<_>>>()?;

    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut buffer);
        if let Some(repeat) = repeat {
            encoder
                .set_repeat(repeat)
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
        }
        encoder
            .encode_frames(frames)
            .map_err(|e| IoError::EncodeError(e.to_string()))?;
    }
    Ok(buffer)
}

/// Reads the first frame of a GIF file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<ImageData> {
    GifReader.read(path)
}

/// Writes a single-frame GIF.
pub fn write<P: AsRef<Path>>(path: P, image: &ImageData) -> IoResult<()> {
    GifWriter.write(path, image)
}

/// Encodes an infinitely looping animation, zero delay between frames.
pub fn write_animation_to_memory(frames: &[ImageData]) -> IoResult<Vec<u8>> {
    trace!(frames = frames.len(), "gif animation");
    encode_frames(frames, Some(Repeat::Infinite))
}

/// Writes an infinitely looping animation to a file.
pub fn write_animation<P: AsRef<Path>>(path: P, frames: &[ImageData]) -> IoResult<()> {
    let data = write_animation_to_memory(frames)?;
    std::fs::write(path.as_ref(), data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> ImageData {
        let mut data = Vec::new();
        for _ in 0..width * height {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        ImageData::from_u8(width, height, 4, data)
    }

    fn count_frames(bytes: &[u8]) -> usize {
        GifDecoder::new(Cursor::new(bytes))
            .unwrap()
            .into_frames()
            .count()
    }

    #[test]
    fn test_single_frame_roundtrip() {
        let image = solid(8, 6, [255, 0, 0]);
        let bytes = GifWriter.write_to_memory(&image).unwrap();
        let loaded = GifReader.read_from_memory(&bytes).unwrap();
        assert_eq!((loaded.width, loaded.height), (8, 6));
        assert_eq!(loaded.channels, 4);
        assert_eq!(count_frames(&bytes), 1);
    }

    #[test]
    fn test_animation_frame_count() {
        let frames = vec![
            solid(10, 10, [0, 0, 0]),
            solid(10, 10, [255, 255, 255]),
            solid(10, 10, [0, 255, 0]),
        ];
        let bytes = write_animation_to_memory(&frames).unwrap();
        assert_eq!(count_frames(&bytes), 3);

        let first = GifReader.read_from_memory(&bytes).unwrap();
        assert_eq!((first.width, first.height), (10, 10));
    }

    #[test]
    fn test_empty_animation_is_error() {
        assert!(write_animation_to_memory(&[]).is_err());
    }
}
