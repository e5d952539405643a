//! Golden hash tests for output stability.
//!
//! A fixed set of cases (input fixture, options, seed) is glitched and the
//! result is reduced to a SHA256 digest of its dimensions and pixels. The
//! digests must be identical across runs and platforms.
//!
//! # Architecture
//!
//! 1. [`cases`] builds the inputs and settings
//! 2. [`run_case`] glitches one case, [`digest`] hashes the result
//! 3. `glitch_hash` prints `name digest` lines for every case
//! 4. The tests compare against `tests/golden/hashes.txt` when present
//!
//! # Running
//!
//! Regenerate the reference file after an intended output change:
//! ```bash
//! cargo run --package glitch-tests --bin glitch_hash > tests/golden/hashes.txt
//! ```

use glitch_core::PixelBuffer;
use glitch_ops::dither::{self, ErrorMode};
use glitch_ops::{GlitchOptions, RandomSource, Strategy, glitchify};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Horizontal/vertical colour gradient.
pub fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut img = PixelBuffer::new(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            img.set_pixel(
                x,
                y,
                [
                    (x * 255 / (width as i32 - 1).max(1)) as u8,
                    (y * 255 / (height as i32 - 1).max(1)) as u8,
                    ((x + y) * 3) as u8,
                    255,
                ],
            );
        }
    }
    img
}

/// 8x8 black/white checkerboard cells.
pub fn checker(width: u32, height: u32) -> PixelBuffer {
    let mut img = PixelBuffer::new(width, height);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let v = if (x / 8 + y / 8) % 2 == 0 { 0 } else { 255 };
            img.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    img
}

// ---------------------------------------------------------------------------
// Hash utilities
// ---------------------------------------------------------------------------

/// SHA256 of width, height and RGBA samples, as lowercase hex.
pub fn digest(img: &PixelBuffer) -> String {
    let mut hasher = Sha256::new();
    hasher.update(img.width().to_le_bytes());
    hasher.update(img.height().to_le_bytes());
    hasher.update(img.data());
    hex::encode(hasher.finalize())
}

mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut s = String::with_capacity(bytes.len() * 2);
        for &b in bytes {
            s.push(HEX_CHARS[(b >> 4) as usize] as char);
            s.push(HEX_CHARS[(b & 0xf) as usize] as char);
        }
        s
    }
}

// ---------------------------------------------------------------------------
// Cases
// ---------------------------------------------------------------------------

/// What a golden case runs on its input.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Full pipeline with a seed.
    Glitch(GlitchOptions, &'static str),
    /// Floyd-Steinberg at threshold 128.
    FloydSteinberg(ErrorMode),
    /// Atkinson at threshold 128.
    Atkinson(ErrorMode),
    /// Ordered 4x4 dither.
    Bayer,
    /// Halftone 3x3 cells at threshold 128.
    Halftone,
    /// 4x4 block-average dither at threshold 128.
    EightBit,
}

/// One named golden case.
#[derive(Debug, Clone)]
pub struct Case {
    /// Stable identifier, first column of the hash file.
    pub name: &'static str,
    /// Input image.
    pub input: PixelBuffer,
    /// Operation applied to the input.
    pub operation: Operation,
}

/// All golden cases, in file order.
pub fn cases() -> Vec<Case> {
    let wtf = GlitchOptions {
        glitch_factor: 30.0,
        ..GlitchOptions::default()
    };
    let simple = GlitchOptions {
        glitch_factor: 30.0,
        strategy: Strategy::Simple,
        ..GlitchOptions::default()
    };
    let clamped = GlitchOptions {
        glitch_factor: 60.0,
        error_mode: ErrorMode::Clamped,
        scanlines: false,
        ..GlitchOptions::default()
    };

    vec![
        Case {
            name: "wtf_gradient_alpha",
            input: gradient(96, 64),
            operation: Operation::Glitch(wtf.clone(), "alpha"),
        },
        Case {
            name: "wtf_gradient_beta",
            input: gradient(96, 64),
            operation: Operation::Glitch(wtf, "beta"),
        },
        Case {
            name: "simple_checker",
            input: checker(80, 48),
            operation: Operation::Glitch(simple, "alpha"),
        },
        Case {
            name: "clamped_gradient",
            input: gradient(64, 64),
            operation: Operation::Glitch(clamped, "gamma"),
        },
        Case {
            name: "floyd_steinberg_wrapping",
            input: gradient(64, 32),
            operation: Operation::FloydSteinberg(ErrorMode::Wrapping),
        },
        Case {
            name: "floyd_steinberg_clamped",
            input: gradient(64, 32),
            operation: Operation::FloydSteinberg(ErrorMode::Clamped),
        },
        Case {
            name: "atkinson_wrapping",
            input: gradient(64, 32),
            operation: Operation::Atkinson(ErrorMode::Wrapping),
        },
        Case {
            name: "bayer",
            input: gradient(64, 32),
            operation: Operation::Bayer,
        },
        Case {
            name: "halftone",
            input: gradient(64, 32),
            operation: Operation::Halftone,
        },
        Case {
            name: "eight_bit",
            input: gradient(64, 32),
            operation: Operation::EightBit,
        },
    ]
}

/// Applies a case to a copy of its input.
pub fn run_case(case: &Case) -> PixelBuffer {
    let mut img = case.input.clone();
    match &case.operation {
        Operation::Glitch(options, seed) => {
            let mut rng = RandomSource::from_seed_str(seed);
            img = glitchify(&case.input, options, &mut rng);
        }
        Operation::FloydSteinberg(mode) => dither::floyd_steinberg(&mut img, 128, *mode),
        Operation::Atkinson(mode) => dither::atkinson(&mut img, 128, *mode),
        Operation::Bayer => dither::bayer(&mut img),
        Operation::Halftone => dither::halftone(&mut img, 128),
        Operation::EightBit => dither::eight_bit(&mut img, 128),
    }
    img
}

// ---------------------------------------------------------------------------
// Golden file format
// ---------------------------------------------------------------------------

/// Parses `name digest` lines. Blank lines and `#` comments are skipped.
pub fn parse_golden(content: &str) -> HashMap<String, String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            Some((parts.next()?.to_string(), parts.next()?.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn load_golden() -> Option<HashMap<String, String>> {
        let paths = [
            PathBuf::from("../../tests/golden/hashes.txt"),
            PathBuf::from("tests/golden/hashes.txt"),
        ];

        for path in &paths {
            if path.exists() {
                let content = std::fs::read_to_string(path).ok()?;
                return Some(parse_golden(&content));
            }
        }

        None
    }

    #[test]
    fn test_digest_covers_dimensions() {
        // same samples, different shape
        let a = PixelBuffer::filled(4, 2, [1, 2, 3, 4]);
        let b = PixelBuffer::filled(2, 4, [1, 2, 3, 4]);
        assert_ne!(digest(&a), digest(&b));
        assert_eq!(digest(&a).len(), 64);
    }

    #[test]
    fn test_case_names_unique() {
        let cases = cases();
        let names: std::collections::HashSet<_> = cases.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), cases.len());
    }

    #[test]
    fn test_cases_are_repeatable() {
        for case in cases() {
            let first = digest(&run_case(&case));
            let second = digest(&run_case(&case));
            assert_eq!(first, second, "{} is not deterministic", case.name);
            println!("{} {}", case.name, first);
        }
    }

    #[test]
    fn test_seed_changes_digest() {
        let all = cases();
        let find = |name: &str| {
            let case = all.iter().find(|c| c.name == name).unwrap();
            digest(&run_case(case))
        };
        assert_ne!(find("wtf_gradient_alpha"), find("wtf_gradient_beta"));
    }

    #[test]
    fn test_error_modes_differ() {
        let all = cases();
        let find = |name: &str| {
            let case = all.iter().find(|c| c.name == name).unwrap();
            digest(&run_case(case))
        };
        assert_ne!(
            find("floyd_steinberg_wrapping"),
            find("floyd_steinberg_clamped")
        );
    }

    #[test]
    fn test_parse_golden() {
        let golden = parse_golden("# header\n\nbayer abc123\nhalftone   def456\nbroken\n");
        assert_eq!(golden.len(), 2);
        assert_eq!(golden["bayer"], "abc123");
        assert_eq!(golden["halftone"], "def456");
    }

    #[test]
    fn test_against_golden_file() {
        let Some(golden) = load_golden() else {
            println!("no golden file, skipping");
            return;
        };
        for case in cases() {
            if let Some(expected) = golden.get(case.name) {
                assert_eq!(&digest(&run_case(&case)), expected, "{} drifted", case.name);
            }
        }
    }
}
