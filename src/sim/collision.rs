//! Collision detection
//!
//! Everything collides as an axis-aligned bounding box. The ball is treated
//! as a square of side `2 * radius`, not a true circle.

use glam::Vec2;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from a center point and full size
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Bounding square of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::from_center(center, Vec2::splat(radius * 2.0))
    }

    /// Overlap test; touching edges count as overlapping
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}
