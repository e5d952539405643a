//! Glitch command: load, glitch, save.

use crate::{ErrorModeArg, GlitchArgs, Mode};
use anyhow::{Result, bail};
use glitch_io::{Format, WriteOptions};
use glitch_ops::{ErrorMode, GlitchOptions, RandomSource, Strategy, glitch_frames, glitchify};
use std::path::Path;
use tracing::info;

impl From<Mode> for Strategy {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Wtf => Strategy::Wtf,
            Mode::Simple => Strategy::Simple,
        }
    }
}

impl From<ErrorModeArg> for ErrorMode {
    fn from(mode: ErrorModeArg) -> Self {
        match mode {
            ErrorModeArg::Wrapping => ErrorMode::Wrapping,
            ErrorModeArg::Clamped => ErrorMode::Clamped,
        }
    }
}

impl GlitchArgs {
    fn options(&self) -> GlitchOptions {
        GlitchOptions {
            glitch_factor: self.glitch,
            brightness: self.brightness,
            scanlines: self.scanlines,
            strategy: self.mode.into(),
            error_mode: self.error_mode.into(),
        }
    }
}

/// Host name used as the default seed.
fn host_seed() -> String {
    ["HOSTNAME", "COMPUTERNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .chain(std::fs::read_to_string("/etc/hostname").ok())
        .map(|name| name.trim().to_string())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rejects argument combinations before any file is touched.
fn check_args(args: &GlitchArgs, options: &GlitchOptions) -> Result<Format> {
    options.validate()?;

    let format = Format::from_extension(&args.output);
    if format == Format::Unknown {
        bail!("Image format not supported. Please use GIF, JPEG or PNG.");
    }
    if args.frames > 1 && format != Format::Gif {
        bail!("Frames > 1 is only valid for gifs");
    }
    Ok(format)
}

pub fn run(args: GlitchArgs) -> Result<()> {
    let options = args.options();
    check_args(&args, &options)?;

    let seed = args.seed.clone().unwrap_or_else(host_seed);
    let mut rng = RandomSource::from_seed_str(&seed);
    info!(seed = %seed, numeric_seed = rng.seed(), input = %args.input.display(), "glitching");

    let image = super::load_image(&args.input)?;
    write_output(&args.output, &image, &options, &mut rng, args.frames, args.quality)
}

fn write_output(
    output: &Path,
    image: &glitch_core::PixelBuffer,
    options: &GlitchOptions,
    rng: &mut RandomSource,
    frames: usize,
    quality: u8,
) -> Result<()> {
    if frames > 1 {
        let frames = glitch_frames(image, options, rng, frames);
        info!(frames = frames.len(), output = %output.display(), "writing animation");
        return super::save_animation(output, &frames);
    }

    let glitched = glitchify(image, options, rng);
    info!(output = %output.display(), "writing image");
    super::save_image(output, &glitched, &WriteOptions { jpeg_quality: quality })
}
