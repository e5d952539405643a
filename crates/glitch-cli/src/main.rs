//! glitch - Glitch-art image generator
//!
//! Reads a PNG, JPEG or GIF, tears, dithers and re-composites it with a
//! seeded random stream, and writes the result as PNG, JPEG or GIF.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "glitch")]
#[command(author, version, about = "Glitch-art image generator")]
#[command(long_about = "
Turns an image into glitch art: shifted bands, dithered layers, swapped
colour channels, a brightness boost and scanlines. The same input, options
and seed always produce the same output.

Examples:
  glitch in.jpg out.png                     # Defaults, seeded by host name
  glitch -g 40 -s demo in.png out.jpg       # Heavier glitching, fixed seed
  glitch -l false -b 0 in.png out.png       # No scanlines, no brightening
  glitch -f 12 in.png out.gif               # 12-frame looping animation
  glitch -m simple -g 20 in.png out.png     # Band tearing only
")]
struct Cli {
    #[command(flatten)]
    args: GlitchArgs,

    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log every composition step
    #[arg(long, global = true)]
    debug: bool,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file", global = true)]
    log_file: Option<PathBuf>,
}

/// Composition pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    /// Pool-based pipeline with dithered layers
    Wtf,
    /// Band tearing and a channel swap only
    Simple,
}

/// Error arithmetic of the diffusion dithers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ErrorModeArg {
    /// 8-bit wraparound (bright streaks)
    Wrapping,
    /// Signed error, clamped
    Clamped,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct GlitchArgs {
    /// Input image (PNG, JPEG or GIF)
    pub input: PathBuf,

    /// Output image (.png, .jpg/.jpeg or .gif)
    pub output: PathBuf,

    /// How much glitching to do (0-100)
    #[arg(short = 'g', long = "glitch", default_value_t = 5.0, allow_negative_numbers = true)]
    pub glitch: f64,

    /// How much brightening to do (0-100)
    #[arg(short = 'b', long = "brightness", default_value_t = 5.0, allow_negative_numbers = true)]
    pub brightness: f64,

    /// Apply the scan line filter
    #[arg(short = 'l', long = "scanlines", default_value_t = true, action = ArgAction::Set)]
    pub scanlines: bool,

    /// Seed for the randomiser (default: host name)
    #[arg(short = 's', long = "seed")]
    pub seed: Option<String>,

    /// Number of frames (only valid for gif output)
    #[arg(short = 'f', long = "frames", default_value_t = 0)]
    pub frames: usize,

    /// Composition pipeline
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = Mode::Wtf)]
    pub mode: Mode,

    /// Error arithmetic of the diffusion dithers
    #[arg(long = "error-mode", value_enum, default_value_t = ErrorModeArg::Wrapping)]
    pub error_mode: ErrorModeArg,

    /// JPEG quality (1-100)
    #[arg(short = 'q', long = "quality", default_value_t = 75,
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,
}

/// Installs the global subscriber. `RUST_LOG` overrides the flags.
///
/// The returned guard must live until exit so buffered file logs flush.
fn init_logging(verbose: u8, debug: bool, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let mut directives = level.to_string();
    if debug && verbose < 2 {
        directives.push_str(",glitch_ops::glitch=debug");
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.debug, cli.log_file.as_deref())?;
    commands::glitch::run(cli.args)
}
