//! Axis-aligned rectangle geometry
//!
//! Every collider in the arena (tanks, bullets, obstacles, power-ups) is an
//! axis-aligned rectangle. Intervals are half-open: `[left, right)` and
//! `[top, bottom)`, so rectangles that merely share an edge do not overlap.

use glam::Vec2;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center.x - size.x / 2.0, center.y - size.y / 2.0, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Same size, re-centered on `center`
    pub fn with_center(&self, center: Vec2) -> Self {
        Self::from_center(center, self.size())
    }

    /// Shift by `delta`
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }

    /// True if this rectangle overlaps `other`
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }

    /// Point-in-rectangle on the same half-open intervals
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// True if this rectangle lies entirely inside `outer` (edges may coincide)
    pub fn is_within(&self, outer: &Rect) -> bool {
        self.left() >= outer.left()
            && self.right() <= outer.right()
            && self.top() >= outer.top()
            && self.bottom() <= outer.bottom()
    }

    /// True once no part of this rectangle can be seen inside `bounds`
    pub fn is_outside(&self, bounds: &Rect) -> bool {
        self.right() < bounds.left()
            || self.left() > bounds.right()
            || self.bottom() < bounds.top()
            || self.top() > bounds.bottom()
    }
}

/// Standard AABB overlap test on half-open intervals
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && b.left() < a.right() && a.top() < b.bottom() && b.top() < a.bottom()
}
