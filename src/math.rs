//! # 2D Math Primitives
//!
//! Minimal vector/rectangle types for placement arithmetic.
//!
//! ## Determinism Guarantee
//!
//! All operations are plain `f32` arithmetic with a fixed evaluation order,
//! so identical inputs produce identical placements on any platform.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Tolerance used by the overlap test.
///
/// Rectangles whose extents meet within this tolerance are treated as
/// touching, not overlapping, so frames may share exact edges.
pub const OVERLAP_EPSILON: f32 = f32::EPSILON;

/// A 2D point or offset in world or local space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new vector.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// An axis-aligned rectangle, stored as its two extreme corners.
///
/// `right_top >= left_bottom` component-wise is expected but not enforced
/// here; inverted configuration rectangles are rejected during validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Bottom-left corner.
    pub left_bottom: Vec2,
    /// Top-right corner.
    pub right_top: Vec2,
}

impl Rect {
    /// Creates a rectangle from its two corners.
    #[inline]
    #[must_use]
    pub const fn new(left_bottom: Vec2, right_top: Vec2) -> Self {
        Self {
            left_bottom,
            right_top,
        }
    }

    /// Returns this rectangle shifted by `offset`.
    #[inline]
    #[must_use]
    pub fn translated(self, offset: Vec2) -> Self {
        Self::new(self.left_bottom + offset, self.right_top + offset)
    }

    /// Tests whether two rectangles overlap.
    ///
    /// Two rectangles overlap iff both their X extents and Y extents
    /// strictly intersect. The product of the signed extent gaps is
    /// negative exactly when an axis intersects, and exact edge contact
    /// yields a zero product, which stays above `-OVERLAP_EPSILON`.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let gap_x = (self.right_top.x - other.left_bottom.x) * (self.left_bottom.x - other.right_top.x);
        let gap_y = (self.right_top.y - other.left_bottom.y) * (self.left_bottom.y - other.right_top.y);

        gap_x < -OVERLAP_EPSILON && gap_y < -OVERLAP_EPSILON
    }

    /// Tests whether `inner` lies entirely within this rectangle.
    ///
    /// Comparison is closed: an inner edge may sit exactly on the boundary.
    #[inline]
    #[must_use]
    pub fn contains(&self, inner: &Self) -> bool {
        inner.left_bottom.x >= self.left_bottom.x
            && inner.left_bottom.y >= self.left_bottom.y
            && inner.right_top.x <= self.right_top.x
            && inner.right_top.y <= self.right_top.y
    }

    /// Tests whether the corners are consistently ordered.
    #[inline]
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.right_top.x >= self.left_bottom.x && self.right_top.y >= self.left_bottom.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(lx: f32, ly: f32, rx: f32, ry: f32) -> Rect {
        Rect::new(Vec2::new(lx, ly), Vec2::new(rx, ry))
    }

    #[test]
    fn test_overlap_detected() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(2.0, 2.0, 6.0, 6.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let a = rect(0.0, 0.0, 4.0, 4.0);
        let b = rect(4.0, 0.0, 8.0, 4.0);
        let c = rect(0.0, 4.0, 4.0, 8.0);

        assert!(!a.overlaps(&b), "shared vertical edge must not overlap");
        assert!(!a.overlaps(&c), "shared horizontal edge must not overlap");
    }

    #[test]
    fn test_disjoint_rects() {
        let a = rect(0.0, 0.0, 1.0, 1.0);
        let b = rect(5.0, 5.0, 6.0, 6.0);

        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_axis_intersection_alone_is_not_overlap() {
        // X extents intersect, Y extents do not.
        let a = rect(0.0, 0.0, 4.0, 1.0);
        let b = rect(2.0, 5.0, 6.0, 6.0);

        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_containment() {
        let outer = rect(0.0, 0.0, 10.0, 10.0);

        assert!(outer.contains(&rect(1.0, 1.0, 9.0, 9.0)));
        assert!(outer.contains(&rect(0.0, 0.0, 10.0, 10.0)), "boundary contact counts as contained");
        assert!(!outer.contains(&rect(8.0, 0.0, 14.0, 4.0)), "exceeds bound on X");
    }

    #[test]
    fn test_translate() {
        let r = rect(-1.0, -2.0, 1.0, 2.0).translated(Vec2::new(10.0, 20.0));

        assert_eq!(r, rect(9.0, 18.0, 11.0, 22.0));
    }
}
