//! The player: a gravity-affected body with jump, shield and landing rules

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::collision::Aabb;
use super::obstacle::Obstacle;
use super::state::Screen;
use crate::consts::*;

/// Temporary invincibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Shield {
    pub active: bool,
    /// Only meaningful while `active`
    pub remaining_ms: i64,
}

impl Shield {
    fn tick(&mut self, elapsed_ms: i64) {
        if self.active {
            self.remaining_ms -= elapsed_ms;
            if self.remaining_ms <= 0 {
                self.active = false;
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    score: u32,
    /// Resting on top of the current obstacle
    pub on_surface: bool,
    pub shield: Shield,
    /// Run animation frame in `0..RUN_FRAME_COUNT`
    pub frame: u8,
    frame_timer_ms: i64,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: KinematicBody::new(pos, PLAYER_WIDTH, PLAYER_HEIGHT).with_gravity(),
            score: 0,
            on_surface: false,
            shield: Shield::default(),
            frame: 0,
            frame_timer_ms: 0,
        }
    }

    /// Player for a fresh attempt, hovering just above the obstacle ground
    pub fn spawn(screen: &Screen) -> Self {
        let top = screen.obstacle_ground() - PLAYER_HEIGHT - PLAYER_SPAWN_LIFT;
        Self::new(Vec2::new(PLAYER_X, top))
    }

    /// Jump if grounded or standing on an obstacle. No double jumps.
    pub fn jump(&mut self, screen: &Screen) -> bool {
        let grounded =
            (self.body.bottom() - screen.player_ground()).abs() < JUMP_GROUND_TOLERANCE;
        if grounded || self.on_surface {
            self.body.acc.y = JUMP_IMPULSE;
            self.on_surface = false;
            true
        } else {
            false
        }
    }

    pub fn update(&mut self, elapsed_ms: i64, screen: &Screen) {
        self.shield.tick(elapsed_ms);

        let ground = screen.player_ground();
        if self.body.hitbox().bottom() >= ground {
            self.body.set_y(ground - self.body.height());
            self.body.vel.y = 0.0;
        }

        self.animate(elapsed_ms);
        self.body.integrate(elapsed_ms);
        self.body.acc = Vec2::ZERO;
    }

    fn animate(&mut self, elapsed_ms: i64) {
        self.frame_timer_ms += elapsed_ms;
        if self.frame_timer_ms > RUN_FRAME_DELAY_MS {
            self.frame = (self.frame + 1) % RUN_FRAME_COUNT;
            self.frame_timer_ms = 0;
        }
    }

    /// Track standing on `obstacle` and score a completed ride.
    ///
    /// Feet inside the band just below the obstacle top, with horizontal
    /// overlap, put the player on the surface. While on the surface, feet
    /// within `LANDING_REST_TOLERANCE` of the top award a point and consume
    /// the on-surface flag, so one landing scores once. Returns true when a
    /// point was awarded.
    pub fn check_landing(&mut self, obstacle: &Obstacle) -> bool {
        let bottom = self.body.bottom();
        let top = obstacle.top();

        if bottom >= top
            && bottom <= top + LANDING_BAND
            && self.hitbox().overlaps_horizontally(obstacle.hitbox())
        {
            self.on_surface = true;
        }

        if self.on_surface && (bottom - top).abs() < LANDING_REST_TOLERANCE {
            self.award_point();
            self.on_surface = false;
            return true;
        }
        false
    }

    /// Start (or restart) the shield countdown. Durations do not stack.
    pub fn activate_shield(&mut self, duration_ms: i64) {
        self.shield = Shield {
            active: true,
            remaining_ms: duration_ms,
        };
    }

    pub fn is_shield_active(&self) -> bool {
        self.shield.active
    }

    pub fn award_point(&mut self) {
        self.score += 1;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn hitbox(&self) -> &Aabb {
        self.body.hitbox()
    }
}
