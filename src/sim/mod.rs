//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick impulses only (no wall-clock reads)
//! - Seeded RNG only
//! - Fixed update order (layers, obstacle, player, then collision)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod layer;
pub mod level;
pub mod obstacle;
pub mod player;
pub mod state;
pub mod tick;

pub use body::KinematicBody;
pub use collision::Aabb;
pub use layer::{LayerDepth, ParallaxLayer, ParallaxLayers};
pub use level::LevelConfig;
pub use obstacle::{HazardKind, Obstacle, ObstacleKind, Spawner};
pub use player::{Player, Shield};
pub use state::{Attempt, GameEvent, GamePhase, GameState, Screen};
pub use tick::{TickInput, tick};
