//! Game state and the level/attempt lifecycle
//!
//! Everything owned by the current attempt lives here and is replaced
//! wholesale by `setup_level`.

use serde::{Deserialize, Serialize};

use super::layer::ParallaxLayers;
use super::level::LevelConfig;
use super::obstacle::{Obstacle, ObstacleKind, Spawner};
use super::player::Player;
use crate::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH};

/// Lifecycle of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first activation
    Start,
    /// Active gameplay
    Running,
    /// Target score reached, waiting for activation to advance
    LevelComplete,
    /// Hit a hazard without a shield, waiting for activation to retry
    Lost,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u8 },
    ObstacleEvaded { score: u32, evaded: u32 },
    Spawned { kind: ObstacleKind },
    ShieldCollected,
    Landed { score: u32 },
    SpeedUp { increments: u32, obstacle_speed: f32 },
    LevelComplete { level: u8, score: u32 },
    Lost { level: u8, score: u32 },
}

/// Screen geometry in abstract units, fixed for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
        }
    }
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Line obstacles rest on
    pub fn obstacle_ground(&self) -> f32 {
        self.height - self.width / 8.0
    }

    /// Line the player is clamped to. Sits lower than the obstacle ground;
    /// the landing tolerances are tuned against this offset.
    pub fn player_ground(&self) -> f32 {
        self.height - self.width / 10.0
    }
}

/// Counters scoped to one attempt at a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    /// Obstacles evaded since the last forced power-up
    pub evaded: u32,
    /// Level 2 speed-ups applied so far
    pub speed_increments: u32,
    /// Leftward speed given to newly spawned obstacles
    pub obstacle_speed: f32,
}

impl Attempt {
    pub fn for_level(level: &LevelConfig) -> Self {
        Self {
            evaded: 0,
            speed_increments: 0,
            obstacle_speed: level.obstacle_speed,
        }
    }
}

/// Complete run state, owned by the loop thread
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; every attempt's spawner derives from it
    pub seed: u64,
    pub screen: Screen,
    pub phase: GamePhase,
    pub level: &'static LevelConfig,
    pub player: Player,
    pub obstacle: Obstacle,
    pub layers: ParallaxLayers,
    pub attempt: Attempt,
    pub spawner: Spawner,
    /// Ticks simulated while running, across attempts
    pub time_ticks: u64,
    /// Events since the last `drain_events`
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session in the `Start` phase, with level 1 laid out for display
    pub fn new(seed: u64, screen: Screen) -> Self {
        let level = LevelConfig::resolve(1);
        let mut attempt = Attempt::for_level(level);
        let mut spawner = Spawner::for_attempt(seed, level.number);
        let obstacle = spawner.spawn_next(level, &mut attempt, &screen);
        Self {
            seed,
            screen,
            phase: GamePhase::Start,
            level,
            player: Player::spawn(&screen),
            obstacle,
            layers: ParallaxLayers::for_level(level, screen.width),
            attempt,
            spawner,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Start (or restart) `level` from scratch and enter `Running`
    pub fn setup_level(&mut self, level: u8) {
        let level = LevelConfig::resolve(level);
        self.level = level;
        self.attempt = Attempt::for_level(level);
        self.spawner = Spawner::for_attempt(self.seed, level.number);
        self.player = Player::spawn(&self.screen);
        self.layers = ParallaxLayers::for_level(level, self.screen.width);
        self.obstacle = self
            .spawner
            .spawn_next(level, &mut self.attempt, &self.screen);
        self.phase = GamePhase::Running;

        log::info!("{} (target {})", level.label, level.target_score());
        self.events.push(GameEvent::LevelStarted {
            level: level.number,
        });
    }

    /// Handle the activation input (tap / touch-down)
    pub fn activate(&mut self) {
        match self.phase {
            GamePhase::Start => self.setup_level(1),
            GamePhase::LevelComplete => self.setup_level(self.level.next_number()),
            GamePhase::Lost => self.setup_level(self.level.number),
            GamePhase::Running => {}
        }
    }

    /// Handle the jump input. Only meaningful while running.
    pub fn jump(&mut self) -> bool {
        if self.phase == GamePhase::Running {
            self.player.jump(&self.screen)
        } else {
            false
        }
    }

    /// Replace the live obstacle using the spawn policy
    pub fn respawn_obstacle(&mut self) {
        self.obstacle = self
            .spawner
            .spawn_next(self.level, &mut self.attempt, &self.screen);
        self.events.push(GameEvent::Spawned {
            kind: self.obstacle.kind,
        });
    }

    pub fn score(&self) -> u32 {
        self.player.score()
    }

    pub fn target_score(&self) -> u32 {
        self.level.target_score()
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}
