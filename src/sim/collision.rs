//! Axis-aligned hitboxes and overlap tests
//!
//! Every moving entity is a rectangle in screen space (y grows downward).
//! Overlap tests are strict: rectangles that only share an edge do not touch,
//! so a player resting exactly on an obstacle's top edge is not a collision.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box `[min.x, min.y, max.x, max.y]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box with its top-left corner at `pos` and the given size
    #[inline]
    pub fn from_pos_size(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.overlaps_horizontally(other)
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Strict overlap on the x axis only
    #[inline]
    pub fn overlaps_horizontally(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && other.min.x < self.max.x
    }
}
