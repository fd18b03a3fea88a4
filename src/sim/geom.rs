//! Axis-aligned bounding box intersection
//!
//! Collision geometry is always the rectangular bounding box, even for
//! obstacles drawn with a glitched outline.

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Strict overlap test on both axes.
///
/// Rectangles that share only an edge do NOT intersect: a player grazing an
/// obstacle's exact edge survives. Pure, no side effects.
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
