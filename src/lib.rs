//! Eco Runner - an endless-runner arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, level state)
//! - `game_loop`: Fixed-cadence scheduler driving update and render
//! - `render`: Back-to-front draw order against a host-provided surface
//! - `assets`: Symbolic image ids resolved by a host-provided provider
//! - `settings`: Session configuration

pub mod assets;
pub mod game_loop;
pub mod render;
pub mod settings;
pub mod sim;

#[cfg(test)]
mod testing;

pub use assets::{AssetError, AssetId, AssetProvider, AttemptAssets};
pub use game_loop::{GameLoop, InputLatch, LoopConfig, LoopError, LoopStats, StopHandle};
pub use render::{Color, Surface, TextStyle, render};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// Velocities and accelerations are per tick, not per second. They are tuned
/// against the scheduler's fixed ~60 Hz cadence.
pub mod consts {
    /// Target time between loop iterations (~60 Hz)
    pub const TARGET_FRAME_MS: u64 = 16;

    /// Default portrait screen, in abstract units
    pub const DEFAULT_SCREEN_WIDTH: f32 = 1080.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 2340.0;

    /// Downward velocity added every tick to gravity-affected bodies
    pub const GRAVITY: f32 = 4.0;
    /// One-tick vertical acceleration applied by a jump
    pub const JUMP_IMPULSE: f32 = -60.0;
    /// Max distance between the player's feet and the ground line to allow a jump
    pub const JUMP_GROUND_TOLERANCE: f32 = 5.0;

    /// Band below an obstacle's top edge in which the player counts as landed
    pub const LANDING_BAND: f32 = 10.0;
    /// Distance from the obstacle top within which a landing is scored
    pub const LANDING_REST_TOLERANCE: f32 = 5.0;

    /// Player spawn
    pub const PLAYER_X: f32 = 400.0;
    pub const PLAYER_WIDTH: f32 = 10.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Gap between the player's feet and the obstacle ground line at spawn
    pub const PLAYER_SPAWN_LIFT: f32 = 20.0;

    /// Run animation
    pub const RUN_FRAME_COUNT: u8 = 3;
    pub const RUN_FRAME_DELAY_MS: i64 = 100;

    /// Shield granted by the power-up (10 seconds)
    pub const SHIELD_DURATION_MS: i64 = 10_000;

    /// Obstacles share one fixed size
    pub const OBSTACLE_WIDTH: f32 = 200.0;
    pub const OBSTACLE_HEIGHT: f32 = 200.0;

    /// Chance that a regular spawn is a power-up
    pub const POWER_UP_CHANCE: f32 = 0.2;
    /// Evaded obstacles after which the next spawn is forced to be a power-up
    pub const FORCED_POWER_UP_EVASIONS: u32 = 10;

    /// Number of levels before the game wraps back to level 1
    pub const LEVEL_COUNT: u8 = 9;
    /// Level whose speed ramps up as the score grows
    pub const SPEED_RAMP_LEVEL: u8 = 2;
    /// Score interval between speed-ups
    pub const SPEED_RAMP_EVERY: u32 = 5;
    /// Speed added to layers and obstacles at every speed-up
    pub const SPEED_RAMP_STEP: f32 = 2.0;

    /// Autopilot jumps when a hazard will reach the player within this many ticks
    pub const AUTOPILOT_LEAD_TICKS: f32 = 6.0;
}

/// Score needed to complete a level: 20 for level 1, +10 per level after
#[inline]
pub fn target_score(level: u8) -> u32 {
    20 + 10 * (u32::from(level.max(1)) - 1)
}
