//! CLI command implementations

pub mod glitch;

use anyhow::{Context, Result};
use glitch_core::PixelBuffer;
use glitch_io::{ImageData, WriteOptions};
use std::path::Path;

/// Load image from path as an RGBA pixel buffer
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let image = glitch_io::read(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?;
    image
        .to_pixel_buffer()
        .with_context(|| format!("Failed to decode: {}", path.display()))
}

/// Save image to path, format by extension
pub fn save_image(path: &Path, image: &PixelBuffer, options: &WriteOptions) -> Result<()> {
    glitch_io::write_with_options(path, &ImageData::from_pixel_buffer(image), options)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Save frames as a looping GIF animation
pub fn save_animation(path: &Path, frames: &[PixelBuffer]) -> Result<()> {
    let frames: Vec<ImageData> = frames.iter().map(ImageData::from_pixel_buffer).collect();
    glitch_io::gif::write_animation(path, &frames)
        .with_context(|| format!("Failed to save animation: {}", path.display()))
}
