//! Obstacles and the spawn policy
//!
//! One obstacle is live at a time. It enters just past the right edge on the
//! obstacle ground line and is replaced once it leaves the left edge or is
//! consumed as a power-up.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::collision::Aabb;
use super::level::LevelConfig;
use super::state::{Attempt, Screen};
use crate::consts::*;

/// Hazard variants (only the sprite differs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardKind {
    Litter,
    Smog,
    Sludge,
    ToxicBarrel,
    Cloud,
    Van,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Shield pickup
    PowerUp,
    Hazard(HazardKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: KinematicBody,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// Obstacle at the right edge of the screen, resting on the obstacle ground
    pub fn at_ground(kind: ObstacleKind, screen: &Screen, speed: f32) -> Self {
        let pos = Vec2::new(screen.width, screen.obstacle_ground() - OBSTACLE_HEIGHT);
        Self {
            body: KinematicBody::new(pos, OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
                .with_velocity(Vec2::new(-speed, 0.0)),
            kind,
        }
    }

    pub fn update(&mut self, elapsed_ms: i64) {
        self.body.integrate(elapsed_ms);
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.body.right() < 0.0
    }

    pub fn is_power_up(&self) -> bool {
        self.kind == ObstacleKind::PowerUp
    }

    pub fn hitbox(&self) -> &Aabb {
        self.body.hitbox()
    }

    pub fn top(&self) -> f32 {
        self.body.y()
    }
}

/// Seeded obstacle chooser
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
}

impl Spawner {
    pub fn new(rng: Pcg32) -> Self {
        Self { rng }
    }

    /// Spawner for one attempt. The stream is keyed by level, so replaying a
    /// level with the same session seed replays the same obstacle sequence.
    pub fn for_attempt(seed: u64, level: u8) -> Self {
        Self::new(Pcg32::new(seed, u64::from(level)))
    }

    /// Choose the next obstacle.
    ///
    /// Ten evasions force a power-up and reset the counter; otherwise a
    /// power-up appears with `POWER_UP_CHANCE` and a hazard from the level's
    /// table the rest of the time.
    pub fn spawn_next(&mut self, level: &LevelConfig, attempt: &mut Attempt, screen: &Screen) -> Obstacle {
        let kind = if attempt.evaded >= FORCED_POWER_UP_EVASIONS {
            attempt.evaded = 0;
            log::debug!("Forced power-up spawn");
            ObstacleKind::PowerUp
        } else if self.rng.random::<f32>() < POWER_UP_CHANCE {
            ObstacleKind::PowerUp
        } else {
            let index = self.rng.random_range(0..level.hazards.len());
            ObstacleKind::Hazard(level.hazards[index])
        };

        Obstacle::at_ground(kind, screen, attempt.obstacle_speed)
    }
}
