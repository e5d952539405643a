//! The glitch composition engine.
//!
//! Builds a glitched image out of a pool of derived buffers, a fixed catalog
//! of transforms and one seeded random stream.
//!
//! # Strategies
//!
//! - [`Strategy::Wtf`] - the full pipeline, see [`wtfify`]
//! - [`Strategy::Simple`] - band tearing plus one channel swap, see
//!   [`imageglitcher`]
//!
//! # Pipeline ([`glitchify`])
//!
//! ```text
//! input ──clone──► output ──strategy──► brightness ──► scanlines? ──► result
//! ```
//!
//! # Determinism
//!
//! Every random choice comes from the [`RandomSource`] passed in, consumed
//! in a fixed order. Same input, options and seed give the same bytes.
//!
//! # Example
//!
//! ```rust
//! use glitch_core::PixelBuffer;
//! use glitch_ops::glitch::{glitchify, GlitchOptions};
//! use glitch_ops::random::RandomSource;
//!
//! let input = PixelBuffer::filled(32, 32, [120, 80, 200, 255]);
//! let opts = GlitchOptions::default();
//!
//! let a = glitchify(&input, &opts, &mut RandomSource::from_seed_str("demo"));
//! let b = glitchify(&input, &opts, &mut RandomSource::from_seed_str("demo"));
//! assert_eq!(a, b);
//! assert_eq!(a.dimensions(), input.dimensions());
//! ```

use std::fmt;

use crate::channel::copy_channel;
use crate::composite::{BlendOp, Mask};
use crate::dither::{self, ErrorMode};
use crate::filter::{brightness, scanlines};
use crate::random::RandomSource;
use crate::wrap::wrap_slice;
use crate::{OpsError, OpsResult};
use glitch_core::{AlphaMask, Channel, PixelBuffer};
use tracing::{debug, info, trace};

/// Threshold range for dithers applied inside the main loop.
const LOOP_THRESHOLD: (i32, i32) = (64, 192);

/// Threshold range for the dithered pool slots built during setup.
const SETUP_THRESHOLD: (i32, i32) = (0, 255);

/// One entry of the transform catalog.
///
/// Catalog order is fixed; a random index in `0..11` selects an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// Atkinson-dither a copy of the source, then tear it over the target.
    Atkinson,
    /// Eight-bit-dither a copy, then tear it over.
    EightBit,
    /// Bayer-dither a copy, then tear it over.
    Bayer,
    /// Halftone a copy, then tear it over.
    Halftone,
    /// Floyd–Steinberg-dither a copy, then tear it over.
    FloydSteinberg,
    /// Tear the source over the target.
    WrapOver,
    /// Tear the source into the target, replacing it.
    WrapSrc,
    /// Copy the red channel.
    CopyRed,
    /// Copy the green channel.
    CopyGreen,
    /// Copy the blue channel.
    CopyBlue,
    /// Reload the shared mask from the source's red channel.
    CopyAlpha,
}

impl TransformKind {
    /// Catalog in selection order.
    pub const ALL: [TransformKind; 11] = [
        TransformKind::Atkinson,
        TransformKind::EightBit,
        TransformKind::Bayer,
        TransformKind::Halftone,
        TransformKind::FloydSteinberg,
        TransformKind::WrapOver,
        TransformKind::WrapSrc,
        TransformKind::CopyRed,
        TransformKind::CopyGreen,
        TransformKind::CopyBlue,
        TransformKind::CopyAlpha,
    ];

    /// Name used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            TransformKind::Atkinson => "atkinsons",
            TransformKind::EightBit => "8bit",
            TransformKind::Bayer => "bayer",
            TransformKind::Halftone => "halftone",
            TransformKind::FloydSteinberg => "floydsteinberg",
            TransformKind::WrapOver => "wrapOver",
            TransformKind::WrapSrc => "wrapSrc",
            TransformKind::CopyRed => "copyRed",
            TransformKind::CopyGreen => "copyGreen",
            TransformKind::CopyBlue => "copyBlue",
            TransformKind::CopyAlpha => "copyAlpha",
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One buffer of the working pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolSlot {
    /// Eight-bit dithered copy of the input.
    EightBit,
    /// Halftoned copy of the input.
    Halftone,
    /// Input red channel only.
    Red,
    /// Input green channel only.
    Green,
    /// Input blue channel only.
    Blue,
    /// Plain copy of the input.
    Original,
}

impl PoolSlot {
    /// Pool in selection (and final compositing) order.
    pub const ALL: [PoolSlot; 6] = [
        PoolSlot::EightBit,
        PoolSlot::Halftone,
        PoolSlot::Red,
        PoolSlot::Green,
        PoolSlot::Blue,
        PoolSlot::Original,
    ];

    /// Name used in log output.
    pub const fn name(self) -> &'static str {
        match self {
            PoolSlot::EightBit => "8bit",
            PoolSlot::Halftone => "halftone",
            PoolSlot::Red => "red",
            PoolSlot::Green => "green",
            PoolSlot::Blue => "blue",
            PoolSlot::Original => "original",
        }
    }
}

impl fmt::Display for PoolSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which composition pipeline [`glitchify`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Pool-based pipeline ([`wtfify`]).
    #[default]
    Wtf,
    /// Band tearing and a channel swap only ([`imageglitcher`]).
    Simple,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Wtf => f.write_str("wtf"),
            Strategy::Simple => f.write_str("simple"),
        }
    }
}

/// Parameters for [`glitchify`].
#[derive(Debug, Clone, PartialEq)]
pub struct GlitchOptions {
    /// Glitch intensity, 0 to 100.
    pub glitch_factor: f64,
    /// Brightness boost in percent, 0 to 100.
    pub brightness: f64,
    /// Paint every even row black.
    pub scanlines: bool,
    /// Composition pipeline.
    pub strategy: Strategy,
    /// Error arithmetic of the diffusion dithers.
    pub error_mode: ErrorMode,
}

impl Default for GlitchOptions {
    fn default() -> Self {
        Self {
            glitch_factor: 5.0,
            brightness: 5.0,
            scanlines: true,
            strategy: Strategy::Wtf,
            error_mode: ErrorMode::Wrapping,
        }
    }
}

impl GlitchOptions {
    /// Checks that both factors lie in `[0, 100]`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glitch_ops::glitch::GlitchOptions;
    ///
    /// assert!(GlitchOptions::default().validate().is_ok());
    /// let bad = GlitchOptions { glitch_factor: 101.0, ..Default::default() };
    /// assert!(bad.validate().is_err());
    /// ```
    pub fn validate(&self) -> OpsResult<()> {
        if !(0.0..=100.0).contains(&self.glitch_factor) {
            return Err(OpsError::InvalidParameter(format!(
                "glitch factor must be between 0 and 100, got {}",
                self.glitch_factor
            )));
        }
        if !(0.0..=100.0).contains(&self.brightness) {
            return Err(OpsError::InvalidParameter(format!(
                "brightness factor must be between 0 and 100, got {}",
                self.brightness
            )));
        }
        Ok(())
    }
}

/// Number of loop iterations for a fractional count: `ceil(n)`, 0 if `n <= 0`.
#[inline]
fn iterations(n: f64) -> usize {
    if n > 0.0 { n.ceil() as usize } else { 0 }
}

/// Largest horizontal shift for a given factor and width.
#[inline]
fn max_offset(factor: f64, width: i32) -> i32 {
    (factor / 100.0 * width as f64) as i32
}

/// Tears `ceil(factor)` random bands of `src` onto `dst`.
///
/// Each band draws, in order: a start row in `[0, H)`, a height in
/// `[1, (H / 2) * factor / 100)` capped at the rows left below the start,
/// and a shift in `[-max, max)` with `max = factor / 100 * W`.
pub fn wrap_pass(
    rng: &mut RandomSource,
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    mask: Mask<'_>,
    op: BlendOp,
    factor: f64,
) {
    let width = src.width() as i32;
    let height = src.height() as i32;
    let max = max_offset(factor, width);
    let band_limit = ((height / 2) as f64 * factor / 100.0) as i32;

    for _ in 0..iterations(factor) {
        let start_y = rng.range(0, height);
        let band = (height - start_y).min(rng.range(1, band_limit));
        let shift = rng.range(-max, max);
        wrap_slice(dst, src, shift, start_y, band, mask, op);
    }
}

/// Band tearing over the full image, `ceil(2 * factor)` times, followed by
/// copying one random colour channel from `input` back onto `output`.
fn tear(
    rng: &mut RandomSource,
    input: &PixelBuffer,
    output: &mut PixelBuffer,
    mask: Mask<'_>,
    factor: f64,
) {
    let width = input.width() as i32;
    let height = input.height() as i32;
    let max = max_offset(factor, width);

    for _ in 0..iterations(factor * 2.0) {
        let start_y = rng.range(0, height);
        let band = (height - start_y).min(rng.range(1, height / 4));
        let shift = rng.range(-max, max);
        wrap_slice(output, input, shift, start_y, band, mask, BlendOp::Src);
    }

    let channel = rng.color_channel();
    debug!(%channel, "imageglitcher: restore channel");
    copy_channel(output, input, channel);
}

/// The simple glitch: bands of `input` are rotated into `output`
/// (replacing it) with full coverage, then one random colour channel of
/// `input` is copied back over `output`.
pub fn imageglitcher(
    input: &PixelBuffer,
    output: &mut PixelBuffer,
    factor: f64,
    rng: &mut RandomSource,
) {
    trace!(factor, "imageglitcher");
    tear(rng, input, output, Mask::Opaque, factor);
}

/// Mutable state shared by the transforms of one [`wtfify`] run.
struct Compositor<'a> {
    rng: &'a mut RandomSource,
    mask: AlphaMask,
    factor: f64,
    error_mode: ErrorMode,
}

impl Compositor<'_> {
    fn wrap(&mut self, src: &PixelBuffer, dst: &mut PixelBuffer, op: BlendOp) {
        wrap_pass(self.rng, src, dst, Mask::Alpha(&self.mask), op, self.factor);
    }

    fn loop_threshold(&mut self) -> i32 {
        self.rng.range(LOOP_THRESHOLD.0, LOOP_THRESHOLD.1)
    }

    /// Applies one catalog transform reading `src` and writing `dst`.
    fn apply(&mut self, kind: TransformKind, src: &PixelBuffer, dst: &mut PixelBuffer) {
        match kind {
            TransformKind::Atkinson
            | TransformKind::EightBit
            | TransformKind::Bayer
            | TransformKind::Halftone
            | TransformKind::FloydSteinberg => {
                let mut scratch = src.clone();
                match kind {
                    TransformKind::Atkinson => {
                        let t = self.loop_threshold();
                        dither::atkinson(&mut scratch, t as u8, self.error_mode);
                    }
                    TransformKind::EightBit => {
                        let t = self.loop_threshold();
                        dither::eight_bit(&mut scratch, t);
                    }
                    TransformKind::Bayer => dither::bayer(&mut scratch),
                    TransformKind::Halftone => {
                        let t = self.loop_threshold();
                        dither::halftone(&mut scratch, t as u16);
                    }
                    _ => {
                        let t = self.loop_threshold();
                        dither::floyd_steinberg(&mut scratch, t as u8, self.error_mode);
                    }
                }
                self.mask.load_channel(&scratch, Channel::Red);
                self.wrap(&scratch, dst, BlendOp::Over);
            }
            TransformKind::WrapOver => self.wrap(src, dst, BlendOp::Over),
            TransformKind::WrapSrc => self.wrap(src, dst, BlendOp::Src),
            TransformKind::CopyRed => copy_channel(dst, src, Channel::Red),
            TransformKind::CopyGreen => copy_channel(dst, src, Channel::Green),
            TransformKind::CopyBlue => copy_channel(dst, src, Channel::Blue),
            TransformKind::CopyAlpha => self.mask.load_channel(src, Channel::Red),
        }
    }
}

/// Returns `(&pool[src], &mut pool[dst])` for two distinct slots.
fn split_pair(pool: &mut [PixelBuffer], src: usize, dst: usize) -> (&PixelBuffer, &mut PixelBuffer) {
    debug_assert_ne!(src, dst);
    if src < dst {
        let (lo, hi) = pool.split_at_mut(dst);
        (&lo[src], &mut hi[0])
    } else {
        let (lo, hi) = pool.split_at_mut(src);
        (&hi[0], &mut lo[dst])
    }
}

/// Builds the six pool buffers from the input.
fn build_pool(input: &PixelBuffer, rng: &mut RandomSource) -> Vec<PixelBuffer> {
    let (width, height) = input.dimensions();

    let mut eight_bit = input.clone();
    dither::eight_bit(&mut eight_bit, rng.range(SETUP_THRESHOLD.0, SETUP_THRESHOLD.1));

    let mut halftone = input.clone();
    dither::halftone(&mut halftone, rng.range(SETUP_THRESHOLD.0, SETUP_THRESHOLD.1) as u16);

    let only = |channel: Channel| {
        let mut buf = PixelBuffer::new(width, height);
        copy_channel(&mut buf, input, channel);
        buf
    };

    PoolSlot::ALL
        .iter()
        .map(|slot| match slot {
            PoolSlot::EightBit => eight_bit.clone(),
            PoolSlot::Halftone => halftone.clone(),
            PoolSlot::Red => only(Channel::Red),
            PoolSlot::Green => only(Channel::Green),
            PoolSlot::Blue => only(Channel::Blue),
            PoolSlot::Original => input.clone(),
        })
        .collect()
}

/// The full pool-based glitch.
///
/// 1. Setup: the pool is built from `input` (two dithered copies, three
///    single-channel buffers, one plain copy) and the shared mask is loaded
///    from the input's red channel.
/// 2. Eleven rounds, each picking a destination slot, a source slot and a
///    transform, applying it, then applying a second random transform from
///    the untouched `input` onto another random slot.
/// 3. Every slot is torn over `output` in pool order.
/// 4. The mask is reset to full coverage, `output` is snapshotted, and the
///    simple glitch runs from the snapshot into `output`.
///
/// When a round picks the same slot as source and destination the source is
/// cloned first, so a transform never reads pixels it is writing.
pub fn wtfify(
    input: &PixelBuffer,
    output: &mut PixelBuffer,
    factor: f64,
    error_mode: ErrorMode,
    rng: &mut RandomSource,
) {
    trace!(factor, %error_mode, "wtfify");
    let mut pool = build_pool(input, rng);
    let mut comp = Compositor {
        rng,
        mask: AlphaMask::from_channel(input, Channel::Red),
        factor,
        error_mode,
    };

    let catalog = TransformKind::ALL.len();
    for round in 0..catalog {
        let dst = comp.rng.index(pool.len());
        let src = comp.rng.index(pool.len());
        let kind = TransformKind::ALL[comp.rng.index(catalog)];
        debug!(
            round,
            transform = %kind,
            from = %PoolSlot::ALL[src],
            to = %PoolSlot::ALL[dst],
            "transform"
        );
        if src == dst {
            let snapshot = pool[src].clone();
            comp.apply(kind, &snapshot, &mut pool[dst]);
        } else {
            let (s, d) = split_pair(&mut pool, src, dst);
            comp.apply(kind, s, d);
        }

        let dst = comp.rng.index(pool.len());
        let kind = TransformKind::ALL[comp.rng.index(catalog)];
        debug!(
            round,
            transform = %kind,
            from = "input",
            to = %PoolSlot::ALL[dst],
            "transform"
        );
        comp.apply(kind, input, &mut pool[dst]);
    }

    for (slot, buf) in PoolSlot::ALL.iter().zip(&pool) {
        debug!(transform = %TransformKind::WrapOver, from = %slot, to = "output", "transform");
        comp.wrap(buf, output, BlendOp::Over);
    }

    debug!("reset alpha mask");
    comp.mask.fill(255);

    let snapshot = output.clone();
    debug!("imageglitcher for final output");
    tear(comp.rng, &snapshot, output, Mask::Alpha(&comp.mask), factor);
}

/// Glitches `input` into a new buffer of the same size.
///
/// Runs the selected strategy on a copy of the input, then the brightness
/// filter and, if enabled, scanlines. Options are expected to be validated
/// with [`GlitchOptions::validate`]; out-of-range factors do not panic but
/// give meaningless results.
pub fn glitchify(
    input: &PixelBuffer,
    options: &GlitchOptions,
    rng: &mut RandomSource,
) -> PixelBuffer {
    info!(
        width = input.width(),
        height = input.height(),
        glitch = options.glitch_factor,
        strategy = %options.strategy,
        "glitchify"
    );
    let mut output = input.clone();

    match options.strategy {
        Strategy::Wtf => wtfify(
            input,
            &mut output,
            options.glitch_factor,
            options.error_mode,
            rng,
        ),
        Strategy::Simple => imageglitcher(input, &mut output, options.glitch_factor, rng),
    }

    brightness(&mut output, options.brightness);
    if options.scanlines {
        scanlines(&mut output);
    }
    output
}

/// Produces the frames of an animated glitch.
///
/// Frame 0 is the unmodified input; each following frame is an independent
/// [`glitchify`] of the input drawn from the same random stream in order.
/// A `count` of 0 or 1 yields a single glitched frame.
pub fn glitch_frames(
    input: &PixelBuffer,
    options: &GlitchOptions,
    rng: &mut RandomSource,
    count: usize,
) -> Vec<PixelBuffer> {
    if count <= 1 {
        return vec![glitchify(input, options, rng)];
    }
    let mut frames = Vec::with_capacity(count);
    frames.push(input.clone());
    for i in 1..count {
        debug!(frame = i, "glitching frame");
        frames.push(glitchify(input, options, rng));
    }
    frames
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut img = PixelBuffer::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                img.set_pixel(x, y, [(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, 255]);
            }
        }
        img
    }

    #[test]
    fn test_catalog_order() {
        assert_eq!(TransformKind::ALL.len(), 11);
        assert_eq!(TransformKind::ALL[0], TransformKind::Atkinson);
        assert_eq!(TransformKind::ALL[10], TransformKind::CopyAlpha);
        assert_eq!(PoolSlot::ALL.len(), 6);
        assert_eq!(PoolSlot::ALL[5], PoolSlot::Original);
        assert_eq!(TransformKind::FloydSteinberg.to_string(), "floydsteinberg");
    }

    #[test]
    fn test_options_validate() {
        assert!(GlitchOptions::default().validate().is_ok());
        let edge = GlitchOptions { glitch_factor: 0.0, brightness: 100.0, ..Default::default() };
        assert!(edge.validate().is_ok());
        let neg = GlitchOptions { brightness: -1.0, ..Default::default() };
        assert!(neg.validate().is_err());
        let nan = GlitchOptions { glitch_factor: f64::NAN, ..Default::default() };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_iterations() {
        assert_eq!(iterations(0.0), 0);
        assert_eq!(iterations(0.1), 1);
        assert_eq!(iterations(5.0), 5);
        assert_eq!(iterations(5.5), 6);
        assert_eq!(iterations(-3.0), 0);
    }

    #[test]
    fn test_deterministic() {
        let input = gradient(48, 40);
        let opts = GlitchOptions { glitch_factor: 20.0, ..Default::default() };
        let a = glitchify(&input, &opts, &mut RandomSource::from_seed_str("seed"));
        let b = glitchify(&input, &opts, &mut RandomSource::from_seed_str("seed"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_output() {
        let input = gradient(48, 40);
        let opts = GlitchOptions { glitch_factor: 30.0, scanlines: false, ..Default::default() };
        let a = glitchify(&input, &opts, &mut RandomSource::from_seed_str("one"));
        let b = glitchify(&input, &opts, &mut RandomSource::from_seed_str("two"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_dimensions_preserved() {
        for (w, h) in [(1, 1), (3, 7), (17, 5), (64, 64)] {
            let input = gradient(w, h);
            for strategy in [Strategy::Wtf, Strategy::Simple] {
                let opts = GlitchOptions { glitch_factor: 50.0, strategy, ..Default::default() };
                let out = glitchify(&input, &opts, &mut RandomSource::from_seed(9));
                assert_eq!(out.dimensions(), (w, h));
            }
        }
    }

    #[test]
    fn test_zero_factor_white_image() {
        // No tearing at factor 0: only brightness and scanlines act.
        let input = PixelBuffer::filled(64, 64, [255, 255, 255, 255]);
        let opts = GlitchOptions { glitch_factor: 0.0, brightness: 0.0, ..Default::default() };
        let out = glitchify(&input, &opts, &mut RandomSource::from_seed_str("white"));
        for y in 0..64 {
            let expect = if y % 2 == 0 { [0, 0, 0, 255] } else { [255, 255, 255, 255] };
            for x in 0..64 {
                assert_eq!(out.pixel(x, y), Some(expect), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_zero_factor_white_image_no_scanlines() {
        let input = PixelBuffer::filled(64, 64, [255, 255, 255, 255]);
        let opts = GlitchOptions {
            glitch_factor: 0.0,
            brightness: 0.0,
            scanlines: false,
            ..Default::default()
        };
        let out = glitchify(&input, &opts, &mut RandomSource::from_seed_str("test"));
        assert_eq!(out, input);
    }

    #[test]
    fn test_zero_factor_simple_keeps_input() {
        let input = gradient(20, 20);
        let opts = GlitchOptions {
            glitch_factor: 0.0,
            brightness: 0.0,
            scanlines: false,
            strategy: Strategy::Simple,
            ..Default::default()
        };
        let out = glitchify(&input, &opts, &mut RandomSource::from_seed(1));
        assert_eq!(out, input);
    }

    #[test]
    fn test_scanlines_rows_black() {
        let input = gradient(32, 32);
        let opts = GlitchOptions { glitch_factor: 40.0, ..Default::default() };
        let out = glitchify(&input, &opts, &mut RandomSource::from_seed(5));
        for y in (0..32).step_by(2) {
            assert!(out.row(y).all(|p| p == [0, 0, 0, 255]));
        }
    }

    #[test]
    fn test_wrap_pass_zero_factor_draws_nothing() {
        let src = gradient(8, 8);
        let mut dst = PixelBuffer::new(8, 8);
        let mut rng = RandomSource::from_seed(3);
        let mut untouched = rng.clone();
        wrap_pass(&mut rng, &src, &mut dst, Mask::Opaque, BlendOp::Src, 0.0);
        assert_eq!(rng.range(0, 1 << 20), untouched.range(0, 1 << 20));
        assert!(dst.data().iter().all(|&b| b == 0));
    }

    fn compositor(rng: &mut RandomSource, mask: AlphaMask, factor: f64) -> Compositor<'_> {
        Compositor { rng, mask, factor, error_mode: ErrorMode::default() }
    }

    #[test]
    fn test_copy_kinds_touch_one_channel() {
        let src = PixelBuffer::filled(6, 4, [10, 20, 30, 40]);
        let cases = [
            (TransformKind::CopyRed, [10, 2, 3, 4]),
            (TransformKind::CopyGreen, [1, 20, 3, 4]),
            (TransformKind::CopyBlue, [1, 2, 30, 4]),
        ];
        for (kind, expect) in cases {
            let mut rng = RandomSource::from_seed(1);
            let mut comp = compositor(&mut rng, AlphaMask::opaque(6, 4), 50.0);
            let mut dst = PixelBuffer::filled(6, 4, [1, 2, 3, 4]);
            comp.apply(kind, &src, &mut dst);
            assert_eq!(dst, PixelBuffer::filled(6, 4, expect), "{}", kind);
            assert_eq!(comp.mask, AlphaMask::opaque(6, 4), "{}", kind);
        }
    }

    #[test]
    fn test_copy_alpha_reloads_mask_only() {
        let src = gradient(8, 6);
        let mut dst = PixelBuffer::filled(8, 6, [1, 2, 3, 4]);
        let before = dst.clone();
        let mut rng = RandomSource::from_seed(1);
        let mut comp = compositor(&mut rng, AlphaMask::opaque(8, 6), 50.0);
        comp.apply(TransformKind::CopyAlpha, &src, &mut dst);
        assert_eq!(dst, before);
        assert_eq!(comp.mask, AlphaMask::from_channel(&src, Channel::Red));
    }

    #[test]
    fn test_wrap_src_ignores_destination() {
        // Same seed, same bands: only the blend differs between backgrounds.
        let src = PixelBuffer::filled(32, 16, [200, 200, 200, 255]);
        let run = |kind: TransformKind, bg: u8| {
            let mut mask = AlphaMask::new(32, 16);
            mask.fill(128);
            let mut rng = RandomSource::from_seed(6);
            let mut dst = PixelBuffer::filled(32, 16, [bg, bg, bg, 255]);
            compositor(&mut rng, mask, 50.0).apply(kind, &src, &mut dst);
            dst
        };

        let dark = PixelBuffer::filled(32, 16, [10, 10, 10, 255]);
        let src_dark = run(TransformKind::WrapSrc, 10);
        let src_light = run(TransformKind::WrapSrc, 240);
        let over_dark = run(TransformKind::WrapOver, 10);
        let over_light = run(TransformKind::WrapOver, 240);

        let mut changed = 0;
        let mut blended = 0;
        for y in 0..16 {
            for x in 0..32 {
                if src_dark.pixel(x, y) == dark.pixel(x, y) {
                    continue;
                }
                changed += 1;
                assert_eq!(src_dark.pixel(x, y), src_light.pixel(x, y), "src at ({}, {})", x, y);
                if over_dark.pixel(x, y) != over_light.pixel(x, y) {
                    blended += 1;
                }
            }
        }
        assert!(changed > 0);
        assert!(blended > 0);
    }

    #[test]
    fn test_dither_kinds_reload_mask_and_tear() {
        let src = gradient(30, 30);
        let kinds = [
            TransformKind::Atkinson,
            TransformKind::EightBit,
            TransformKind::Bayer,
            TransformKind::Halftone,
            TransformKind::FloydSteinberg,
        ];
        for kind in kinds {
            let mut rng = RandomSource::from_seed(8);
            let mut expected_rng = rng.clone();

            let mut scratch = src.clone();
            let mode = ErrorMode::default();
            if kind == TransformKind::Bayer {
                dither::bayer(&mut scratch);
            } else {
                let t = expected_rng.range(LOOP_THRESHOLD.0, LOOP_THRESHOLD.1);
                match kind {
                    TransformKind::Atkinson => dither::atkinson(&mut scratch, t as u8, mode),
                    TransformKind::EightBit => dither::eight_bit(&mut scratch, t),
                    TransformKind::Halftone => dither::halftone(&mut scratch, t as u16),
                    _ => dither::floyd_steinberg(&mut scratch, t as u8, mode),
                }
            }
            let expected_mask = AlphaMask::from_channel(&scratch, Channel::Red);
            let mut expected = gradient(30, 30);
            wrap_pass(
                &mut expected_rng,
                &scratch,
                &mut expected,
                Mask::Alpha(&expected_mask),
                BlendOp::Over,
                40.0,
            );

            let mut dst = gradient(30, 30);
            let mut comp = compositor(&mut rng, AlphaMask::opaque(30, 30), 40.0);
            comp.apply(kind, &src, &mut dst);
            assert_eq!(comp.mask, expected_mask, "{}", kind);
            assert_eq!(dst, expected, "{}", kind);
            assert_eq!(rng.range(0, 1 << 20), expected_rng.range(0, 1 << 20), "{}", kind);
        }
    }

    #[test]
    fn test_imageglitcher_only_moves_rows() {
        // Every output row is a rotation of the same input row, and the
        // restored channel matches the input exactly, so each row keeps its
        // per-channel values.
        let input = gradient(16, 16);
        let mut output = input.clone();
        imageglitcher(&input, &mut output, 50.0, &mut RandomSource::from_seed(11));
        assert_ne!(output, input);
        for y in 0..16u32 {
            for c in 0..4 {
                let mut a: Vec<u8> = input.row(y).map(|p| p[c]).collect();
                let mut b: Vec<u8> = output.row(y).map(|p| p[c]).collect();
                a.sort_unstable();
                b.sort_unstable();
                assert_eq!(a, b, "row {} channel {}", y, c);
            }
        }
    }

    #[test]
    fn test_glitch_frames() {
        let input = gradient(12, 12);
        let opts = GlitchOptions::default();
        let frames = glitch_frames(&input, &opts, &mut RandomSource::from_seed(2), 4);
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0], input);

        let single = glitch_frames(&input, &opts, &mut RandomSource::from_seed(2), 0);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0], glitchify(&input, &opts, &mut RandomSource::from_seed(2)));
    }
}
