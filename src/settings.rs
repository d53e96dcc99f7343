//! Session settings
//!
//! Loaded once at startup from a JSON file named by `ECO_RUNNER_SETTINGS`.
//! Missing fields take their defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, TARGET_FRAME_MS};
use crate::game_loop::LoopConfig;
use crate::sim::Screen;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("screen size must be positive, got {width}x{height}")]
    InvalidScreen { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Screen width in abstract units
    pub screen_width: f32,
    /// Screen height in abstract units
    pub screen_height: f32,
    /// Target time between loop iterations
    pub target_frame_ms: u64,
    /// Session seed (random when absent)
    pub seed: Option<u64>,
    /// Jump over hazards automatically
    pub autopilot: bool,
    /// How long the headless runner plays before stopping
    pub run_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            target_frame_ms: TARGET_FRAME_MS,
            seed: None,
            autopilot: true,
            run_seconds: 30,
        }
    }
}

impl Settings {
    /// Environment variable holding the settings file path
    pub const ENV_VAR: &'static str = "ECO_RUNNER_SETTINGS";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from the file named by `ENV_VAR`, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.screen_width > 0.0 && self.screen_height > 0.0 {
            Ok(())
        } else {
            Err(SettingsError::InvalidScreen {
                width: self.screen_width,
                height: self.screen_height,
            })
        }
    }

    pub fn screen(&self) -> Screen {
        Screen::new(self.screen_width, self.screen_height)
    }

    pub fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            target_frame: Duration::from_millis(self.target_frame_ms),
            autopilot: self.autopilot,
        }
    }
}
