//! Fixed-cadence game loop
//!
//! One dedicated thread runs update then render, then sleeps off whatever is
//! left of the frame budget. Overrunning frames are not made up: the next
//! iteration starts immediately with a larger elapsed time.
//!
//! Input arrives from other threads through `InputLatch`, a pair of
//! single-slot flags consumed at the start of each iteration, so entity state
//! is never touched mid-update.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::assets::{AssetError, AssetProvider, AttemptAssets};
use crate::consts::TARGET_FRAME_MS;
use crate::render::{Surface, render};
use crate::sim::{GameEvent, GameState, TickInput, tick};

#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Frame budget; the loop sleeps `target_frame - work` after each frame
    pub target_frame: Duration,
    /// Play automatically (demo / headless mode)
    pub autopilot: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            target_frame: Duration::from_millis(TARGET_FRAME_MS),
            autopilot: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoopError {
    #[error("failed to resolve level assets: {0}")]
    Assets(#[from] AssetError),
    #[error("failed to spawn game loop thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Frames updated and rendered
    pub frames: u64,
    /// Frames whose work exceeded the frame budget
    pub overruns: u64,
}

/// Pending one-shot inputs, written by the host and drained by the loop
#[derive(Debug, Default)]
pub struct InputLatch {
    activate: AtomicBool,
    jump: AtomicBool,
}

impl InputLatch {
    pub fn press_activate(&self) {
        self.activate.store(true, Ordering::Release);
    }

    pub fn press_jump(&self) {
        self.jump.store(true, Ordering::Release);
    }

    /// Consume both flags as `(activate, jump)`
    pub fn take(&self) -> (bool, bool) {
        (
            self.activate.swap(false, Ordering::AcqRel),
            self.jump.swap(false, Ordering::AcqRel),
        )
    }
}

/// Cooperative stop signal, checked once per iteration
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Sleep needed after `work` to fill out `target`
#[inline]
pub fn pacing_delay(target: Duration, work: Duration) -> Duration {
    target.saturating_sub(work)
}

pub struct GameLoop<P, S>
where
    P: AssetProvider,
    S: Surface<Image = P::Image>,
{
    state: GameState,
    provider: P,
    surface: S,
    assets: Option<AttemptAssets<P::Image>>,
    input: Arc<InputLatch>,
    stop: StopHandle,
    config: LoopConfig,
    stats: LoopStats,
}

impl<P, S> GameLoop<P, S>
where
    P: AssetProvider,
    S: Surface<Image = P::Image>,
{
    pub fn new(state: GameState, provider: P, surface: S, config: LoopConfig) -> Self {
        Self {
            state,
            provider,
            surface,
            assets: None,
            input: Arc::new(InputLatch::default()),
            stop: StopHandle::default(),
            config,
            stats: LoopStats::default(),
        }
    }

    /// Shared input slots for the host's event thread
    pub fn input_latch(&self) -> Arc<InputLatch> {
        Arc::clone(&self.input)
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// One iteration: drain input, update, render
    pub fn frame(&mut self, elapsed_ms: i64) -> Result<(), LoopError> {
        let (activate, jump) = self.input.take();
        let input = TickInput {
            activate,
            jump,
            autopilot: self.config.autopilot,
        };
        tick(&mut self.state, &input, elapsed_ms);

        for event in self.state.drain_events() {
            log_event(&event);
        }

        self.refresh_assets()?;
        if let Some(assets) = &self.assets {
            render(&self.state, assets, &mut self.surface);
        }
        self.stats.frames += 1;
        Ok(())
    }

    /// Resolve images when the level differs from the cached one
    fn refresh_assets(&mut self) -> Result<(), AssetError> {
        let level = self.state.level;
        if self.assets.as_ref().map(|a| a.level) != Some(level.number) {
            self.assets = Some(AttemptAssets::resolve(&mut self.provider, level)?);
        }
        Ok(())
    }

    /// Run until the stop handle fires
    pub fn run(&mut self) -> Result<LoopStats, LoopError> {
        log::info!(
            "Game loop starting (target frame {} ms, autopilot {})",
            self.config.target_frame.as_millis(),
            self.config.autopilot
        );

        let mut last = Instant::now();
        while !self.stop.is_stopped() {
            let now = Instant::now();
            let elapsed_ms = i64::try_from(now.duration_since(last).as_millis()).unwrap_or(i64::MAX);

            self.frame(elapsed_ms)?;

            let delay = pacing_delay(self.config.target_frame, now.elapsed());
            if delay.is_zero() {
                self.stats.overruns += 1;
                log::debug!("Frame overran budget ({} ms elapsed)", elapsed_ms);
            } else {
                thread::sleep(delay);
            }
            last = now;
        }

        log::info!(
            "Game loop stopped after {} frames ({} overruns)",
            self.stats.frames,
            self.stats.overruns
        );
        Ok(self.stats)
    }

    /// Move the loop onto its own thread. The handle yields the loop back
    /// once stopped so the caller can inspect the final state.
    pub fn spawn(mut self) -> Result<JoinHandle<Result<Self, LoopError>>, LoopError>
    where
        Self: Send + 'static,
    {
        thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || {
                self.run()?;
                Ok(self)
            })
            .map_err(LoopError::ThreadSpawn)
    }
}

/// Log the events the simulation does not log itself
fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Spawned { kind } => log::trace!("Spawned {:?}", kind),
        GameEvent::Landed { score } => log::debug!("Landed on obstacle (score {})", score),
        // Logged by `tick` / `setup_level`
        GameEvent::LevelStarted { .. }
        | GameEvent::ObstacleEvaded { .. }
        | GameEvent::ShieldCollected
        | GameEvent::SpeedUp { .. }
        | GameEvent::LevelComplete { .. }
        | GameEvent::Lost { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetId;
    use crate::sim::{GamePhase, HazardKind, LayerDepth, Screen};
    use crate::testing::{DrawCall, EchoProvider, RecordingSurface};

    fn game_loop(provider: EchoProvider) -> GameLoop<EchoProvider, RecordingSurface> {
        GameLoop::new(
            GameState::new(11, Screen::default()),
            provider,
            RecordingSurface::default(),
            LoopConfig::default(),
        )
    }

    #[test]
    fn test_pacing_delay() {
        let target = Duration::from_millis(16);
        assert_eq!(pacing_delay(target, Duration::from_millis(4)), Duration::from_millis(12));
        assert_eq!(pacing_delay(target, Duration::from_millis(16)), Duration::ZERO);
        assert_eq!(pacing_delay(target, Duration::from_millis(40)), Duration::ZERO);
    }

    #[test]
    fn test_latch_is_single_shot() {
        let latch = InputLatch::default();
        latch.press_jump();
        latch.press_jump();
        assert_eq!(latch.take(), (false, true));
        assert_eq!(latch.take(), (false, false));
        latch.press_activate();
        assert_eq!(latch.take(), (true, false));
    }

    #[test]
    fn test_frame_renders_start_screen() {
        let mut game = game_loop(EchoProvider::default());
        game.frame(0).unwrap();
        assert_eq!(game.state().phase, GamePhase::Start);
        assert_eq!(game.stats().frames, 1);
        assert_eq!(game.surface().calls.first(), Some(&DrawCall::Clear(crate::Color::WHITE)));
    }

    #[test]
    fn test_latched_activation_applies_next_frame() {
        let mut game = game_loop(EchoProvider::default());
        game.input_latch().press_activate();
        game.frame(16).unwrap();
        assert_eq!(game.state().phase, GamePhase::Running);
        // Consumed
        game.frame(16).unwrap();
        assert_eq!(game.state().level.number, 1);
        assert!(game.state().events.is_empty());
    }

    #[test]
    fn test_assets_reloaded_on_level_change() {
        let mut game = game_loop(EchoProvider::default());
        game.frame(0).unwrap();
        let loads = game.provider.requested.len();
        game.frame(16).unwrap();
        assert_eq!(game.provider.requested.len(), loads);

        game.state.setup_level(2);
        game.frame(16).unwrap();
        assert!(game.provider.requested.len() > loads);
        assert_eq!(game.assets.as_ref().map(|a| a.level), Some(2));
    }

    #[test]
    fn test_missing_asset_fails_the_frame() {
        let mut game = game_loop(EchoProvider::without(&[AssetId::Background {
            level: 1,
            depth: LayerDepth::Near,
        }]));
        let err = game.frame(0).unwrap_err();
        assert!(matches!(err, LoopError::Assets(AssetError::Missing(_))));

        let mut game = game_loop(EchoProvider::without(&[AssetId::Hazard(HazardKind::Van)]));
        game.frame(0).unwrap();
        game.state.setup_level(3);
        assert!(game.frame(16).is_err());
    }

    #[test]
    fn test_spawned_loop_stops_cooperatively() {
        let game = GameLoop::new(
            GameState::new(3, Screen::default()),
            EchoProvider::default(),
            RecordingSurface::default(),
            LoopConfig {
                target_frame: Duration::from_millis(1),
                autopilot: true,
            },
        );
        let input = game.input_latch();
        let stop = game.stop_handle();
        let handle = game.spawn().unwrap();

        input.press_activate();
        thread::sleep(Duration::from_millis(50));
        stop.stop();

        let game = handle.join().unwrap().unwrap();
        assert!(game.stats().frames > 0);
        assert_ne!(game.state().phase, GamePhase::Start);
    }
}
