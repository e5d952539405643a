//! Rectangle and point types for masked blits and band displacement.
//!
//! This module provides the geometric primitives used by the compositing
//! layer:
//! - [`Rect`] - Rectangle with signed origin and dimensions
//! - [`Point`] - Signed offset into an image
//!
//! # Coordinate System
//!
//! All coordinates use the standard image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │   Band   │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! Coordinates are signed because displacement geometry routinely describes
//! regions that start left of (or above) the image and only become valid
//! after clipping.
//!
//! # Usage
//!
//! ```rust
//! use glitch_core::Rect;
//!
//! // Corners given in any order are normalized
//! let band = Rect::from_corners(0, 10, 64, 6);
//! assert_eq!(band, Rect::new(0, 6, 64, 4));
//!
//! // Clip against the image
//! let clipped = Rect::new(-8, 0, 32, 8).intersect(&Rect::from_size(16, 16));
//! assert_eq!(clipped, Some(Rect::new(0, 0, 16, 8)));
//! ```
//!
//! # Used By
//!
//! - [`crate::image::PixelBuffer`] - `bounds()`
//! - `glitch-ops::composite` - clip areas for masked compositing
//! - `glitch-ops::wrap` - band rectangles

use std::ops::Sub;

/// A signed 2D point (or offset) in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// The left/top edges are inclusive, the right/bottom edges exclusive.
///
/// # Invariants
///
/// - `width` and `height` are never negative when built through
///   [`Rect::from_corners`] or [`Rect::intersect`]
/// - A rectangle with zero width or height is empty
///
/// # Example
///
/// ```rust
/// use glitch_core::Rect;
///
/// let rect = Rect::new(10, 20, 100, 50);
/// assert_eq!(rect.right(), 110);
/// assert_eq!(rect.bottom(), 70);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i32,
    /// Y coordinate of the top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) with given dimensions.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glitch_core::Rect;
    ///
    /// let rect = Rect::from_size(1920, 1080);
    /// assert_eq!(rect.x, 0);
    /// assert_eq!(rect.y, 0);
    /// ```
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Creates a rectangle from two corner points.
    ///
    /// If coordinates are swapped they are normalized, so a band described
    /// with a negative height covers the rows above its start row.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glitch_core::Rect;
    ///
    /// let rect = Rect::from_corners(10, 20, 110, 70);
    /// assert_eq!(rect.width, 100);
    /// assert_eq!(rect.height, 50);
    ///
    /// let flipped = Rect::from_corners(0, 5, 8, 4);
    /// assert_eq!(flipped, Rect::new(0, 4, 8, 1));
    /// ```
    #[inline]
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        let (min_x, max_x) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let (min_y, max_y) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Returns the X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Returns the Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Returns the top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns `true` if the rectangle has zero (or negative) area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns the intersection of this rectangle with another.
    ///
    /// Returns `None` if the rectangles don't overlap.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glitch_core::Rect;
    ///
    /// let a = Rect::new(0, 0, 100, 100);
    /// let b = Rect::new(50, 50, 100, 100);
    /// assert_eq!(a.intersect(&b), Some(Rect::new(50, 50, 50, 50)));
    /// ```
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Returns this rectangle translated by (dx, dy).
    ///
    /// # Example
    ///
    /// ```rust
    /// use glitch_core::Rect;
    ///
    /// let rect = Rect::new(10, 20, 100, 50);
    /// assert_eq!(rect.translate(-15, 10), Rect::new(-5, 30, 100, 50));
    /// ```
    #[inline]
    pub const fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_new() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.x, 10);
        assert_eq!(r.y, 20);
        assert_eq!(r.width, 100);
        assert_eq!(r.height, 50);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(-10, 20, 100, 50);
        assert_eq!(r.right(), 90);
        assert_eq!(r.bottom(), 70);
        assert_eq!(r.origin(), Point::new(-10, 20));
    }

    #[test]
    fn test_from_corners_normalizes() {
        assert_eq!(Rect::from_corners(5, 5, 0, 0), Rect::new(0, 0, 5, 5));
        // Negative band height: rows above the start row
        assert_eq!(Rect::from_corners(0, 10, 32, 8), Rect::new(0, 8, 32, 2));
    }

    #[test]
    fn test_rect_empty() {
        assert!(Rect::new(0, 0, 0, 10).is_empty());
        assert!(Rect::new(0, 0, 10, -1).is_empty());
        assert!(!Rect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 100, 100);
        let b = Rect::new(-50, 50, 100, 100);
        assert_eq!(a.intersect(&b), Some(Rect::new(0, 50, 50, 50)));

        let c = Rect::new(200, 200, 50, 50);
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn test_rect_translate() {
        let r = Rect::new(10, 20, 100, 50);
        assert_eq!(r.translate(5, -30), Rect::new(15, -10, 100, 50));
    }

    #[test]
    fn test_point_sub() {
        assert_eq!(Point::new(3, 4) - Point::new(5, 1), Point::new(-2, 3));
    }
}
