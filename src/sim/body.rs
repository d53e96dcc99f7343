//! Kinematic body shared by every moving entity
//!
//! Arcade integration: acceleration and gravity are per-tick velocity deltas,
//! not forces scaled by elapsed time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::GRAVITY;

/// Position, velocity and acceleration of a rectangle
///
/// Position is private so the cached hitbox can never disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pos: Vec2,
    pub vel: Vec2,
    pub acc: Vec2,
    width: f32,
    height: f32,
    pub affected_by_gravity: bool,
    hitbox: Aabb,
}

impl KinematicBody {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            width,
            height,
            affected_by_gravity: false,
            hitbox: Aabb::from_pos_size(pos, width, height),
        }
    }

    pub fn with_gravity(mut self) -> Self {
        self.affected_by_gravity = true;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Advance one tick: `vel += acc`, gravity, then `pos += vel`
    pub fn integrate(&mut self, _elapsed_ms: i64) {
        self.vel += self.acc;
        if self.affected_by_gravity {
            self.vel.y += GRAVITY;
        }
        self.set_pos(self.pos + self.vel);
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.set_pos(Vec2::new(x, y));
    }

    pub fn set_x(&mut self, x: f32) {
        self.set_pos(Vec2::new(x, self.pos.y));
    }

    pub fn set_y(&mut self, y: f32) {
        self.set_pos(Vec2::new(self.pos.x, y));
    }

    fn set_pos(&mut self, pos: Vec2) {
        self.pos = pos;
        self.hitbox = Aabb::from_pos_size(pos, self.width, self.height);
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    #[inline]
    pub fn hitbox(&self) -> &Aabb {
        &self.hitbox
    }
}
