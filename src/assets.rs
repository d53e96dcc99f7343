//! Symbolic image ids and per-attempt resolution
//!
//! The core never decodes images. A host-side `AssetProvider` turns ids into
//! whatever handle its drawing surface understands; the loop keeps only the
//! handles needed by the current level.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::consts::RUN_FRAME_COUNT;
use crate::sim::{HazardKind, LayerDepth, LevelConfig, ObstacleKind};

/// Every image the core asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    /// Run animation frame `0..RUN_FRAME_COUNT`
    PlayerRun(u8),
    /// Overlay drawn on the player while shielded
    ShieldEffect,
    /// Shield pickup
    PowerUp,
    Hazard(HazardKind),
    Background { level: u8, depth: LayerDepth },
    /// Loss screen banner
    LoseText,
}

impl fmt::Display for AssetId {
    /// Resource name, e.g. `run1` or `lvl2_close`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::PlayerRun(0) => write!(f, "run"),
            AssetId::PlayerRun(n) => write!(f, "run{}", n),
            AssetId::ShieldEffect => write!(f, "ecoshield_effect"),
            AssetId::PowerUp => write!(f, "ecoshield"),
            AssetId::Hazard(kind) => {
                let name = match kind {
                    HazardKind::Litter => "ap1",
                    HazardKind::Smog => "ap2",
                    HazardKind::Sludge => "ap3",
                    HazardKind::ToxicBarrel => "toxic",
                    HazardKind::Cloud => "cloud",
                    HazardKind::Van => "van",
                };
                write!(f, "{}", name)
            }
            AssetId::Background { level, depth } => {
                let depth = match depth {
                    LayerDepth::Far => "far",
                    LayerDepth::Mid => "mid",
                    LayerDepth::Near => "close",
                };
                write!(f, "lvl{}_{}", level, depth)
            }
            AssetId::LoseText => write!(f, "lose_text"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("no image available for asset `{0}`")]
    Missing(AssetId),
}

/// Host-side image loader
pub trait AssetProvider {
    type Image: Clone;

    /// Decoded handle for `id`, or `None` if the host has no such image
    fn load(&mut self, id: AssetId) -> Option<Self::Image>;
}

/// Image handles needed for one level
#[derive(Debug, Clone)]
pub struct AttemptAssets<I> {
    pub level: u8,
    pub run_frames: Vec<I>,
    pub shield_effect: I,
    pub power_up: I,
    pub hazards: HashMap<HazardKind, I>,
    pub far: I,
    /// Optional even when the level has a mid layer
    pub mid: Option<I>,
    pub near: I,
    pub lose_text: I,
}

impl<I: Clone> AttemptAssets<I> {
    /// Load every handle `level` can draw. Fails on the first missing
    /// required image.
    pub fn resolve<P>(provider: &mut P, level: &LevelConfig) -> Result<Self, AssetError>
    where
        P: AssetProvider<Image = I>,
    {
        let mut require = |id: AssetId| provider.load(id).ok_or(AssetError::Missing(id));

        let run_frames = (0..RUN_FRAME_COUNT)
            .map(|n| require(AssetId::PlayerRun(n)))
            .collect::<Result<Vec<_>, _>>()?;
        let shield_effect = require(AssetId::ShieldEffect)?;
        let power_up = require(AssetId::PowerUp)?;
        let mut hazards = HashMap::new();
        for &kind in level.hazards {
            hazards.insert(kind, require(AssetId::Hazard(kind))?);
        }
        let background = |depth| AssetId::Background {
            level: level.number,
            depth,
        };
        let far = require(background(LayerDepth::Far))?;
        let near = require(background(LayerDepth::Near))?;
        let lose_text = require(AssetId::LoseText)?;

        let mid = if level.mid_speed.is_some() {
            let mid = provider.load(background(LayerDepth::Mid));
            if mid.is_none() {
                log::debug!("Level {} has no mid layer image", level.number);
            }
            mid
        } else {
            None
        };

        log::debug!("Resolved assets for level {}", level.number);
        Ok(Self {
            level: level.number,
            run_frames,
            shield_effect,
            power_up,
            hazards,
            far,
            mid,
            near,
            lose_text,
        })
    }
}

impl<I> AttemptAssets<I> {
    pub fn obstacle(&self, kind: ObstacleKind) -> Option<&I> {
        match kind {
            ObstacleKind::PowerUp => Some(&self.power_up),
            ObstacleKind::Hazard(hazard) => self.hazards.get(&hazard),
        }
    }

    pub fn layer(&self, depth: LayerDepth) -> Option<&I> {
        match depth {
            LayerDepth::Far => Some(&self.far),
            LayerDepth::Mid => self.mid.as_ref(),
            LayerDepth::Near => Some(&self.near),
        }
    }

    pub fn run_frame(&self, frame: u8) -> Option<&I> {
        self.run_frames.get(usize::from(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::EchoProvider;

    #[test]
    fn test_resource_names() {
        assert_eq!(AssetId::PlayerRun(0).to_string(), "run");
        assert_eq!(AssetId::PlayerRun(2).to_string(), "run2");
        assert_eq!(AssetId::Hazard(HazardKind::Cloud).to_string(), "cloud");
        assert_eq!(
            AssetId::Background {
                level: 3,
                depth: LayerDepth::Near
            }
            .to_string(),
            "lvl3_close"
        );
    }

    #[test]
    fn test_resolve_level_one() {
        let mut provider = EchoProvider::default();
        let assets = AttemptAssets::resolve(&mut provider, LevelConfig::resolve(1)).unwrap();
        assert_eq!(assets.level, 1);
        assert_eq!(assets.run_frames.len(), usize::from(RUN_FRAME_COUNT));
        assert_eq!(assets.hazards.len(), 3);
        assert!(assets.mid.is_some());
        assert_eq!(
            assets.obstacle(ObstacleKind::Hazard(HazardKind::Sludge)),
            Some(&AssetId::Hazard(HazardKind::Sludge))
        );
        assert_eq!(assets.obstacle(ObstacleKind::Hazard(HazardKind::Van)), None);
    }

    #[test]
    fn test_missing_mid_layer_is_not_an_error() {
        let mut provider = EchoProvider::without(&[AssetId::Background {
            level: 1,
            depth: LayerDepth::Mid,
        }]);
        let assets = AttemptAssets::resolve(&mut provider, LevelConfig::resolve(1)).unwrap();
        assert!(assets.layer(LayerDepth::Mid).is_none());
    }

    #[test]
    fn test_level_without_mid_does_not_request_it() {
        let mut provider = EchoProvider::default();
        AttemptAssets::resolve(&mut provider, LevelConfig::resolve(5)).unwrap();
        assert!(!provider.requested.iter().any(|id| matches!(
            id,
            AssetId::Background {
                depth: LayerDepth::Mid,
                ..
            }
        )));
    }

    #[test]
    fn test_ids_are_distinct_keys() {
        let mut provider = EchoProvider::default();
        AttemptAssets::resolve(&mut provider, LevelConfig::resolve(1)).unwrap();
        let unique: std::collections::HashSet<AssetId> = provider.requested.iter().copied().collect();
        assert_eq!(unique.len(), provider.requested.len());
        assert!(unique.contains(&AssetId::Background {
            level: 1,
            depth: LayerDepth::Mid
        }));
        assert!(!unique.contains(&AssetId::Background {
            level: 2,
            depth: LayerDepth::Mid
        }));
    }

    #[test]
    fn test_missing_required_image() {
        let mut provider = EchoProvider::without(&[AssetId::Hazard(HazardKind::Van)]);
        let err = AttemptAssets::resolve(&mut provider, LevelConfig::resolve(4)).unwrap_err();
        assert!(matches!(err, AssetError::Missing(AssetId::Hazard(HazardKind::Van))));
    }
}
