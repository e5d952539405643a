//! Channel-level copies between buffers.

use glitch_core::{Channel, PixelBuffer, CHANNELS};
use tracing::trace;

/// Overwrites one channel of `dst` with the same channel of `src`.
///
/// Pixels are matched by `(x, y)`; when the buffers differ in size only the
/// overlapping top-left region is copied. Other channels are left untouched.
///
/// # Example
///
/// ```rust
/// use glitch_core::{Channel, PixelBuffer};
/// use glitch_ops::channel::copy_channel;
///
/// let src = PixelBuffer::filled(2, 2, [10, 20, 30, 40]);
/// let mut dst = PixelBuffer::filled(2, 2, [0, 0, 0, 255]);
/// copy_channel(&mut dst, &src, Channel::Green);
/// assert_eq!(dst.pixel(1, 1), Some([0, 20, 0, 255]));
/// ```
pub fn copy_channel(dst: &mut PixelBuffer, src: &PixelBuffer, channel: Channel) {
    trace!(%channel, "copy_channel");
    let offset = channel.offset();
    let width = dst.width().min(src.width()) as usize;
    let height = dst.height().min(src.height()) as i32;
    let row_len = width * CHANNELS;

    for y in 0..height {
        let (Some(d0), Some(s0)) = (dst.offset(0, y), src.offset(0, y)) else {
            continue;
        };
        let src_row = &src.data()[s0..s0 + row_len];
        let dst_row = &mut dst.data_mut()[d0..d0 + row_len];
        for (d, s) in dst_row
            .chunks_exact_mut(CHANNELS)
            .zip(src_row.chunks_exact(CHANNELS))
        {
            d[offset] = s[offset];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_only_selected_channel() {
        let src = PixelBuffer::filled(3, 3, [1, 2, 3, 4]);
        for channel in Channel::ALL {
            let mut dst = PixelBuffer::filled(3, 3, [100, 100, 100, 100]);
            copy_channel(&mut dst, &src, channel);
            for px in dst.data().chunks(4) {
                for c in 0..4 {
                    let expect = if c == channel.offset() { src.data()[c] } else { 100 };
                    assert_eq!(px[c], expect);
                }
            }
        }
    }

    #[test]
    fn test_copy_mismatched_sizes() {
        let src = PixelBuffer::filled(2, 1, [7, 7, 7, 7]);
        let mut dst = PixelBuffer::filled(3, 1, [0, 0, 0, 0]);
        copy_channel(&mut dst, &src, Channel::Red);
        assert_eq!(dst.data(), &[7, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_copy_matches_coordinates_across_widths() {
        let mut src = PixelBuffer::new(2, 2);
        src.set_pixel(0, 1, [99, 0, 0, 0]);
        let mut dst = PixelBuffer::new(3, 2);
        copy_channel(&mut dst, &src, Channel::Red);
        assert_eq!(dst.pixel(0, 1), Some([99, 0, 0, 0]));
        assert_eq!(dst.pixel(2, 0), Some([0, 0, 0, 0]));

        // narrower destination, taller source
        let mut src = PixelBuffer::new(3, 3);
        src.set_pixel(2, 0, [0, 0, 50, 0]);
        src.set_pixel(1, 2, [0, 0, 60, 0]);
        let mut dst = PixelBuffer::new(2, 2);
        copy_channel(&mut dst, &src, Channel::Blue);
        assert!(dst.data().iter().all(|&b| b == 0));
    }
}
