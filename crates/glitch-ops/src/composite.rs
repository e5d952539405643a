//! Masked compositing of one buffer onto another.
//!
//! [`draw_mask`] copies or blends a rectangle of a source buffer onto a
//! destination, optionally weighted by a coverage mask. It is the only way
//! pixels move between buffers in the glitch engine.
//!
//! # Blend Operations
//!
//! - [`BlendOp::Src`] - destination is replaced by `source * coverage`
//! - [`BlendOp::Over`] - source is composited over the destination
//!
//! # Arithmetic
//!
//! Channels are widened to 16 bits (`v * 0x101`) and combined with unsigned
//! 32-bit wrapping arithmetic, matching the integer pipeline of classic
//! raster libraries bit for bit. With `M = 0xFFFF`, `m` the widened mask
//! value and `sa` the widened source alpha:
//!
//! ```text
//! Over: a = (M - sa * m / M) * 0x101
//!       d = ((d * a + s * m) / M) >> 8
//! Src:  d = (s * m / M) >> 8
//! ```
//!
//! All four channels, alpha included, follow these formulas.
//!
//! # Example
//!
//! ```rust
//! use glitch_core::{PixelBuffer, Point};
//! use glitch_ops::composite::{draw_mask, BlendOp, Mask};
//!
//! let src = PixelBuffer::filled(4, 4, [255, 0, 0, 255]);
//! let mut dst = PixelBuffer::filled(4, 4, [0, 0, 255, 255]);
//! let r = dst.bounds();
//! draw_mask(&mut dst, r, &src, Point::new(0, 0), Mask::Opaque, Point::new(0, 0), BlendOp::Over);
//! assert_eq!(dst.pixel(2, 2), Some([255, 0, 0, 255]));
//! ```

use glitch_core::{AlphaMask, PixelBuffer, Point, Rect, CHANNELS};
#[allow(unused_imports)]
use tracing::{debug, trace};

const M: u32 = 0xffff;

/// Compositing operator for [`draw_mask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendOp {
    /// Replace the destination with the masked source.
    Src,
    /// Composite the masked source over the destination.
    #[default]
    Over,
}

/// Coverage applied while compositing.
#[derive(Debug, Clone, Copy)]
pub enum Mask<'a> {
    /// Full coverage everywhere, unbounded.
    Opaque,
    /// Per-pixel coverage; zero outside the mask's bounds.
    Alpha(&'a AlphaMask),
}

impl Mask<'_> {
    /// Widened coverage at `(x, y)`.
    #[inline]
    fn coverage(&self, x: i32, y: i32) -> u32 {
        match self {
            Mask::Opaque => M,
            Mask::Alpha(m) => m.value(x, y) as u32 * 0x101,
        }
    }

    fn bounds(&self) -> Option<Rect> {
        match self {
            Mask::Opaque => None,
            Mask::Alpha(m) => Some(m.bounds()),
        }
    }
}

/// Clips `r` to everything addressable and shifts the source and mask
/// points by the amount the top-left corner moved.
///
/// Returns `None` if nothing is left to draw.
fn clip(
    dst: &PixelBuffer,
    r: Rect,
    src: &PixelBuffer,
    sp: Point,
    mask: &Mask<'_>,
    mp: Point,
) -> Option<(Rect, Point, Point)> {
    let orig = r.origin();
    let mut clipped = r.intersect(&dst.bounds())?;
    clipped = clipped.intersect(&src.bounds().translate(orig.x - sp.x, orig.y - sp.y))?;
    if let Some(mb) = mask.bounds() {
        clipped = clipped.intersect(&mb.translate(orig.x - mp.x, orig.y - mp.y))?;
    }
    let delta = clipped.origin() - orig;
    Some((
        clipped,
        Point::new(sp.x + delta.x, sp.y + delta.y),
        Point::new(mp.x + delta.x, mp.y + delta.y),
    ))
}

/// Composites `src` onto `dst` within rectangle `r`.
///
/// The destination pixel at `r.min + d` is combined with the source pixel
/// at `sp + d` under the mask value at `mp + d`. The rectangle is first
/// clipped to the destination bounds, the source bounds and (for
/// [`Mask::Alpha`]) the mask bounds; regions outside any of them are left
/// untouched. An empty or fully clipped rectangle is a no-op.
pub fn draw_mask(
    dst: &mut PixelBuffer,
    r: Rect,
    src: &PixelBuffer,
    sp: Point,
    mask: Mask<'_>,
    mp: Point,
    op: BlendOp,
) {
    if r.is_empty() {
        return;
    }
    let Some((area, sp, mp)) = clip(dst, r, src, sp, &mask, mp) else {
        trace!(%r, "draw_mask: fully clipped");
        return;
    };

    let dst_stride = dst.stride();
    let src_stride = src.stride();
    let src_data = src.data();
    let dst_data = dst.data_mut();

    for dy in 0..area.height {
        let dy_row = (area.y + dy) as usize * dst_stride;
        let sy_row = (sp.y + dy) as usize * src_stride;
        for dx in 0..area.width {
            let ma = mask.coverage(mp.x + dx, mp.y + dy);
            let di = dy_row + (area.x + dx) as usize * CHANNELS;
            let si = sy_row + (sp.x + dx) as usize * CHANNELS;

            let s = [
                src_data[si] as u32 * 0x101,
                src_data[si + 1] as u32 * 0x101,
                src_data[si + 2] as u32 * 0x101,
                src_data[si + 3] as u32 * 0x101,
            ];

            match op {
                BlendOp::Over => {
                    if ma == 0 {
                        continue;
                    }
                    let a = M.wrapping_sub(s[3].wrapping_mul(ma) / M).wrapping_mul(0x101);
                    for c in 0..CHANNELS {
                        let d = dst_data[di + c] as u32;
                        let v = d.wrapping_mul(a).wrapping_add(s[c].wrapping_mul(ma)) / M;
                        dst_data[di + c] = (v >> 8) as u8;
                    }
                }
                BlendOp::Src => {
                    for c in 0..CHANNELS {
                        dst_data[di + c] = ((s[c].wrapping_mul(ma) / M) >> 8) as u8;
                    }
                }
            }
        }
    }
}
