//! Level catalog
//!
//! A fixed table: each level picks its background layer speeds, obstacle speed
//! and hazard set. Speeds are units per tick.

use super::obstacle::HazardKind;
use crate::consts::LEVEL_COUNT;
use crate::target_score;

/// Static configuration for one level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelConfig {
    /// 1-based level number
    pub number: u8,
    /// HUD label
    pub label: &'static str,
    /// Near (foreground) background layer speed
    pub near_speed: f32,
    /// Mid layer speed, if the level has one
    pub mid_speed: Option<f32>,
    /// Far background layer speed
    pub far_speed: f32,
    /// Leftward speed of newly spawned obstacles
    pub obstacle_speed: f32,
    /// Hazards drawn uniformly when a spawn is not a power-up
    pub hazards: &'static [HazardKind],
}

const VAN_ONLY: &[HazardKind] = &[HazardKind::Van];

static LEVELS: [LevelConfig; LEVEL_COUNT as usize] = [
    LevelConfig {
        number: 1,
        label: "LEVEL 1: GREEN HOME",
        near_speed: 8.0,
        mid_speed: Some(4.0),
        far_speed: 2.0,
        obstacle_speed: 14.0,
        hazards: &[HazardKind::Litter, HazardKind::Smog, HazardKind::Sludge],
    },
    LevelConfig {
        number: 2,
        label: "LEVEL 2: ECO FACTORY",
        near_speed: 10.0,
        mid_speed: None,
        far_speed: 6.0,
        obstacle_speed: 14.0,
        hazards: &[HazardKind::ToxicBarrel, HazardKind::Cloud],
    },
    LevelConfig {
        number: 3,
        label: "LEVEL 3: SUSTAINABLE CITY",
        near_speed: 12.0,
        mid_speed: None,
        far_speed: 4.0,
        obstacle_speed: 15.0,
        hazards: VAN_ONLY,
    },
    LevelConfig {
        number: 4,
        label: "LEVEL 4: GLOBAL ECO VILLAGE",
        near_speed: 14.0,
        mid_speed: None,
        far_speed: 10.0,
        obstacle_speed: 16.0,
        hazards: VAN_ONLY,
    },
    LevelConfig {
        number: 5,
        label: "LEVEL 5: ECO WARRIOR",
        near_speed: 16.0,
        mid_speed: None,
        far_speed: 12.0,
        obstacle_speed: 17.0,
        hazards: VAN_ONLY,
    },
    LevelConfig {
        number: 6,
        label: "LEVEL 6: SUSTAINABLE FUTURE",
        near_speed: 18.0,
        mid_speed: None,
        far_speed: 14.0,
        obstacle_speed: 18.0,
        hazards: VAN_ONLY,
    },
    LevelConfig {
        number: 7,
        label: "LEVEL 7: ECO CHAMPION",
        near_speed: 20.0,
        mid_speed: None,
        far_speed: 16.0,
        obstacle_speed: 19.0,
        hazards: VAN_ONLY,
    },
    LevelConfig {
        number: 8,
        label: "LEVEL 8: GLOBAL SUSTAINABILITY",
        near_speed: 22.0,
        mid_speed: None,
        far_speed: 18.0,
        obstacle_speed: 20.0,
        hazards: VAN_ONLY,
    },
    LevelConfig {
        number: 9,
        label: "LEVEL 9: ECO MASTER",
        near_speed: 24.0,
        mid_speed: None,
        far_speed: 20.0,
        obstacle_speed: 21.0,
        hazards: VAN_ONLY,
    },
];

impl LevelConfig {
    /// Look up a level. Out-of-range numbers fall back to level 1.
    pub fn resolve(number: u8) -> &'static LevelConfig {
        match number {
            1..=LEVEL_COUNT => &LEVELS[usize::from(number) - 1],
            _ => {
                log::warn!("Unknown level {}, falling back to level 1", number);
                &LEVELS[0]
            }
        }
    }

    pub fn all() -> &'static [LevelConfig] {
        &LEVELS
    }

    /// Score required to complete this level
    pub fn target_score(&self) -> u32 {
        target_score(self.number)
    }

    /// Level that follows this one (9 wraps to 1)
    pub fn next_number(&self) -> u8 {
        if self.number < LEVEL_COUNT {
            self.number + 1
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_follow_formula() {
        for level in LevelConfig::all() {
            assert_eq!(
                level.target_score(),
                20 + 10 * (u32::from(level.number) - 1)
            );
        }
        assert_eq!(LevelConfig::resolve(1).target_score(), 20);
        assert_eq!(LevelConfig::resolve(9).target_score(), 100);
    }

    #[test]
    fn test_table_is_ordered() {
        for (i, level) in LevelConfig::all().iter().enumerate() {
            assert_eq!(usize::from(level.number), i + 1);
            assert!(!level.hazards.is_empty());
        }
    }

    #[test]
    fn test_out_of_range_falls_back_to_level_one() {
        assert_eq!(LevelConfig::resolve(0).number, 1);
        assert_eq!(LevelConfig::resolve(10).number, 1);
        assert_eq!(LevelConfig::resolve(255).number, 1);
    }

    #[test]
    fn test_hazard_tables() {
        assert_eq!(LevelConfig::resolve(1).hazards.len(), 3);
        assert_eq!(LevelConfig::resolve(2).hazards.len(), 2);
        for n in 3..=9 {
            assert_eq!(LevelConfig::resolve(n).hazards, &[HazardKind::Van]);
        }
    }

    #[test]
    fn test_next_wraps_after_last_level() {
        assert_eq!(LevelConfig::resolve(1).next_number(), 2);
        assert_eq!(LevelConfig::resolve(8).next_number(), 9);
        assert_eq!(LevelConfig::resolve(9).next_number(), 1);
    }
}
