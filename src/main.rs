//! Eco Runner headless entry point
//!
//! Runs the simulation on the game-loop thread against a placeholder asset
//! provider and a surface that only logs the HUD. Useful for soak-testing the
//! loop and watching the autopilot play through the level ladder.

use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;

use eco_runner::sim::{GamePhase, GameState};
use eco_runner::{AssetId, AssetProvider, Color, GameLoop, LoopError, Settings, Surface, TextStyle};

/// Hands out the asset ids themselves as image handles
struct PlaceholderAssets;

impl AssetProvider for PlaceholderAssets {
    type Image = AssetId;

    fn load(&mut self, id: AssetId) -> Option<AssetId> {
        Some(id)
    }
}

/// Logs HUD text whenever it changes
#[derive(Default)]
struct HeadlessSurface {
    hud: Vec<String>,
    frame_hud: Vec<String>,
}

impl Surface for HeadlessSurface {
    type Image = AssetId;

    fn clear(&mut self, _color: Color) {
        if self.frame_hud != self.hud {
            log::debug!("HUD: {}", self.frame_hud.join(" | "));
            self.hud = std::mem::take(&mut self.frame_hud);
        }
        self.frame_hud.clear();
    }

    fn draw_image(&mut self, _image: &AssetId, _dest: eco_runner::sim::Aabb) {}

    fn draw_text(&mut self, text: &str, _anchor: Vec2, _style: &TextStyle) {
        self.frame_hud.push(text.to_string());
    }
}

fn session_seed(settings: &Settings) -> u64 {
    settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    })
}

fn run(settings: &Settings) -> Result<(), LoopError> {
    let seed = session_seed(settings);
    log::info!("Session seed: {}", seed);

    let state = GameState::new(seed, settings.screen());
    let game = GameLoop::new(
        state,
        PlaceholderAssets,
        HeadlessSurface::default(),
        settings.loop_config(),
    );
    let input = game.input_latch();
    let stop = game.stop_handle();
    let handle = game.spawn()?;

    // Tap to start, then keep tapping through banners until time runs out
    let deadline = Instant::now() + Duration::from_secs(settings.run_seconds);
    while Instant::now() < deadline && !handle.is_finished() {
        input.press_activate();
        thread::sleep(Duration::from_millis(500));
    }
    stop.stop();

    let game = match handle.join() {
        Ok(result) => result?,
        Err(_) => {
            log::error!("Game loop thread panicked");
            return Ok(());
        }
    };

    let state = game.state();
    let stats = game.stats();
    log::info!(
        "Finished on level {} ({:?}) with score {} after {} ticks",
        state.level.number,
        state.phase,
        state.score(),
        state.time_ticks
    );
    log::info!("{} frames rendered, {} overran the frame budget", stats.frames, stats.overruns);
    if state.phase == GamePhase::Lost {
        log::info!("Last attempt ended in a loss");
    }
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Eco Runner (headless) starting...");

    let settings = Settings::load();
    if let Err(e) = run(&settings) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
