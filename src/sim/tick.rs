//! Per-tick simulation update
//!
//! Core game step: apply pending input, move everything, score evasions,
//! ramp speed, resolve the player/obstacle collision, check completion.

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start / advance / retry (tap or touch-down)
    pub activate: bool,
    /// Jump (only meaningful while running)
    pub jump: bool,
    /// Demo mode - jump over hazards automatically
    pub autopilot: bool,
}

/// Advance the game by one tick of `elapsed_ms` wall-clock time
pub fn tick(state: &mut GameState, input: &TickInput, elapsed_ms: i64) {
    if input.activate {
        state.activate();
    }

    if state.phase != GamePhase::Running {
        return;
    }

    if input.jump || (input.autopilot && autopilot_should_jump(state)) {
        state.jump();
    }

    state.time_ticks += 1;

    // Fixed order: background, obstacle, player
    state.layers.update(elapsed_ms);
    state.obstacle.update(elapsed_ms);
    state.player.update(elapsed_ms, &state.screen);

    if state.obstacle.is_off_screen() {
        state.attempt.evaded += 1;
        state.player.award_point();
        log::debug!(
            "Obstacle evaded (score {}, evaded {})",
            state.score(),
            state.attempt.evaded
        );
        state.events.push(GameEvent::ObstacleEvaded {
            score: state.score(),
            evaded: state.attempt.evaded,
        });
        state.respawn_obstacle();
    }

    if state.level.number == SPEED_RAMP_LEVEL {
        apply_speed_ramp(state);
    }

    resolve_collision(state);

    if state.phase == GamePhase::Running && state.score() >= state.target_score() {
        state.phase = GamePhase::LevelComplete;
        log::info!("Level {} complete with {} points", state.level.number, state.score());
        state.events.push(GameEvent::LevelComplete {
            level: state.level.number,
            score: state.score(),
        });
    }
}

/// One speed-up per score milestone, each milestone counted once
fn apply_speed_ramp(state: &mut GameState) {
    let milestone = state.score() / SPEED_RAMP_EVERY;
    while state.attempt.speed_increments < milestone {
        state.attempt.speed_increments += 1;
        state.layers.boost(SPEED_RAMP_STEP);
        // vx is negative; subtracting speeds it up
        state.obstacle.body.vel.x -= SPEED_RAMP_STEP;
        state.attempt.obstacle_speed += SPEED_RAMP_STEP;

        log::debug!(
            "Speed up #{} (obstacle speed {})",
            state.attempt.speed_increments,
            state.attempt.obstacle_speed
        );
        state.events.push(GameEvent::SpeedUp {
            increments: state.attempt.speed_increments,
            obstacle_speed: state.attempt.obstacle_speed,
        });
    }
}

fn resolve_collision(state: &mut GameState) {
    let hit = state.player.hitbox().intersects(state.obstacle.hitbox());

    if hit && state.obstacle.is_power_up() {
        state.player.activate_shield(SHIELD_DURATION_MS);
        log::debug!("Shield collected");
        state.events.push(GameEvent::ShieldCollected);
        state.respawn_obstacle();
    } else if hit && !state.player.is_shield_active() {
        state.phase = GamePhase::Lost;
        log::info!("Lost level {} at {} points", state.level.number, state.score());
        state.events.push(GameEvent::Lost {
            level: state.level.number,
            score: state.score(),
        });
    } else if state.player.check_landing(&state.obstacle) {
        // Shielded hits and misses both fall through to the landing check
        state.events.push(GameEvent::Landed {
            score: state.score(),
        });
    }
}

/// Jump when a hazard will reach the player within the lead window
fn autopilot_should_jump(state: &GameState) -> bool {
    if state.obstacle.is_power_up() {
        return false;
    }
    let speed = -state.obstacle.body.vel.x;
    if speed <= 0.0 {
        return false;
    }
    let gap = state.obstacle.hitbox().left() - state.player.hitbox().right();
    gap > 0.0 && gap <= speed * AUTOPILOT_LEAD_TICKS
}
