//! Horizontal band displacement with wraparound.
//!
//! [`wrap_slice`] takes a horizontal band of rows from a source buffer,
//! rotates it sideways by `x_shift` pixels and composites it onto the
//! destination. Whatever falls off one edge re-enters on the other:
//!
//! ```text
//! src band:  | a b c d e f g h |
//! shift +3:  | d e f g h a b c |      dst[x] = src[(x + 3) mod W]
//! shift -3:  | f g h a b c d e |      dst[x] = src[(x - 3) mod W]
//! ```
//!
//! The rotation is done with two [`draw_mask`] calls, one per side of the
//! seam. The mask is sampled at the same point as the source.

use crate::composite::{draw_mask, BlendOp, Mask};
use glitch_core::{PixelBuffer, Point, Rect};
use tracing::trace;

/// Rotates rows `y_pos .. y_pos + height` of `src` by `x_shift` pixels and
/// composites them onto `dst`.
///
/// A zero shift is a no-op. A negative `height` addresses the rows above
/// `y_pos` (band corners are normalized). Rows outside the image are clipped.
/// `|x_shift|` is expected not to exceed the source width.
///
/// # Example
///
/// ```rust
/// use glitch_core::PixelBuffer;
/// use glitch_ops::composite::{BlendOp, Mask};
/// use glitch_ops::wrap::wrap_slice;
///
/// let mut src = PixelBuffer::new(4, 1);
/// for x in 0..4 {
///     src.set_pixel(x, 0, [x as u8, 0, 0, 255]);
/// }
/// let mut dst = src.clone();
/// wrap_slice(&mut dst, &src, 1, 0, 1, Mask::Opaque, BlendOp::Src);
/// assert_eq!(dst.pixel(0, 0), Some([1, 0, 0, 255]));
/// assert_eq!(dst.pixel(3, 0), Some([0, 0, 0, 255]));
/// ```
pub fn wrap_slice(
    dst: &mut PixelBuffer,
    src: &PixelBuffer,
    x_shift: i32,
    y_pos: i32,
    height: i32,
    mask: Mask<'_>,
    op: BlendOp,
) {
    if x_shift == 0 {
        return;
    }
    trace!(x_shift, y_pos, height, ?op, "wrap_slice");

    let width = src.width() as i32;
    let bottom = y_pos + height;

    let (first, second) = if x_shift < 0 {
        (
            (Rect::from_corners(-x_shift, y_pos, width, bottom), Point::new(0, y_pos)),
            (Rect::from_corners(0, y_pos, -x_shift, bottom), Point::new(width + x_shift, y_pos)),
        )
    } else {
        (
            (Rect::from_corners(0, y_pos, width, bottom), Point::new(x_shift, y_pos)),
            (Rect::from_corners(width - x_shift, y_pos, width, bottom), Point::new(0, y_pos)),
        )
    };

    for (r, p) in [first, second] {
        draw_mask(dst, r, src, p, mask, p, op);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glitch_core::AlphaMask;

    fn numbered(width: u32, height: u32) -> PixelBuffer {
        let mut img = PixelBuffer::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                img.set_pixel(x, y, [x as u8, y as u8, 0, 255]);
            }
        }
        img
    }

    #[test]
    fn test_zero_shift_is_noop() {
        let src = numbered(8, 8);
        let mut dst = PixelBuffer::filled(8, 8, [1, 2, 3, 4]);
        let before = dst.clone();
        wrap_slice(&mut dst, &src, 0, 0, 8, Mask::Opaque, BlendOp::Src);
        assert_eq!(dst, before);
    }

    #[test]
    fn test_src_is_cyclic_rotation() {
        let w = 10;
        let src = numbered(w, 6);
        for shift in [-9, -4, -1, 1, 3, 9] {
            let mut dst = src.clone();
            wrap_slice(&mut dst, &src, shift, 2, 3, Mask::Opaque, BlendOp::Src);
            for y in 0..6 {
                for x in 0..w as i32 {
                    let px = dst.pixel(x, y).unwrap();
                    if (2..5).contains(&y) {
                        let expect = (x + shift).rem_euclid(w as i32) as u8;
                        assert_eq!(px[0], expect, "shift {} at ({}, {})", shift, x, y);
                    } else {
                        assert_eq!(px[0], x as u8, "row {} outside band changed", y);
                    }
                }
            }
        }
    }

    #[test]
    fn test_shift_then_complement_restores() {
        let w = 12;
        let src = numbered(w, 5);
        for shift in [1, 5, 11] {
            let mut once = src.clone();
            wrap_slice(&mut once, &src, shift, 1, 3, Mask::Opaque, BlendOp::Src);
            let mut twice = once.clone();
            wrap_slice(&mut twice, &once, w as i32 - shift, 1, 3, Mask::Opaque, BlendOp::Src);
            assert_eq!(twice, src, "shift {}", shift);
        }
    }

    #[test]
    fn test_full_width_shift_is_identity() {
        let src = numbered(8, 4);
        for shift in [8, -8] {
            let mut dst = src.clone();
            wrap_slice(&mut dst, &src, shift, 0, 4, Mask::Opaque, BlendOp::Src);
            assert_eq!(dst, src);
        }
    }

    #[test]
    fn test_negative_height_addresses_rows_above() {
        let src = numbered(6, 6);
        let mut dst = src.clone();
        wrap_slice(&mut dst, &src, 2, 4, -2, Mask::Opaque, BlendOp::Src);
        for y in 0..6 {
            let px = dst.pixel(0, y).unwrap();
            let expect = if (2..4).contains(&y) { 2 } else { 0 };
            assert_eq!(px[0], expect, "row {}", y);
        }
    }

    #[test]
    fn test_band_past_bottom_is_clipped() {
        let src = numbered(6, 4);
        let mut dst = src.clone();
        wrap_slice(&mut dst, &src, 1, 3, 10, Mask::Opaque, BlendOp::Src);
        assert_eq!(dst.pixel(0, 3).unwrap()[0], 1);
        assert_eq!(dst.pixel(0, 2).unwrap()[0], 0);
    }

    #[test]
    fn test_zero_mask_over_leaves_destination() {
        let src = numbered(6, 4);
        let mut dst = PixelBuffer::filled(6, 4, [50, 50, 50, 255]);
        let before = dst.clone();
        let mask = AlphaMask::new(6, 4);
        wrap_slice(&mut dst, &src, 2, 0, 4, Mask::Alpha(&mask), BlendOp::Over);
        assert_eq!(dst, before);
    }
}
