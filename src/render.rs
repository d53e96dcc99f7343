//! Frame composition against a host drawing surface
//!
//! Fixed back-to-front order: far, mid, near backgrounds, obstacle, player
//! (with shield overlay), then HUD text and the end-of-attempt banners.

use glam::Vec2;

use crate::assets::AttemptAssets;
use crate::sim::{Aabb, GamePhase, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(136, 136, 136);
    pub const DARK_GRAY: Color = Color::rgb(68, 68, 68);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub align: TextAlign,
}

const LEVEL_LABEL_STYLE: TextStyle = TextStyle {
    size: 80.0,
    color: Color::DARK_GRAY,
    align: TextAlign::Left,
};
const SCORE_STYLE: TextStyle = TextStyle {
    size: 100.0,
    color: Color::GRAY,
    align: TextAlign::Center,
};
const SHIELD_LABEL_STYLE: TextStyle = TextStyle {
    size: 40.0,
    color: Color::CYAN,
    align: TextAlign::Center,
};
const BANNER_STYLE: TextStyle = TextStyle {
    size: 120.0,
    color: Color::GREEN,
    align: TextAlign::Center,
};

/// HUD baseline from the top of the screen
const HUD_Y: f32 = 100.0;
const LEVEL_LABEL_X: f32 = 50.0;
/// Loss banner half-extents
const LOSE_TEXT_HALF: Vec2 = Vec2::new(600.0, 180.0);

/// Host drawing backend. Scaling and text layout are its concern.
pub trait Surface {
    type Image;

    fn clear(&mut self, color: Color);
    fn draw_image(&mut self, image: &Self::Image, dest: Aabb);
    fn draw_text(&mut self, text: &str, anchor: Vec2, style: &TextStyle);
}

/// Draw one frame of `state`
pub fn render<S: Surface>(state: &GameState, assets: &AttemptAssets<S::Image>, surface: &mut S) {
    let screen = state.screen;
    surface.clear(Color::WHITE);

    for layer in state.layers.iter() {
        if let Some(image) = assets.layer(layer.depth) {
            for x in layer.draw_offsets() {
                let dest = Aabb::from_pos_size(Vec2::new(x, 0.0), screen.width, screen.height);
                surface.draw_image(image, dest);
            }
        }
    }

    if let Some(image) = assets.obstacle(state.obstacle.kind) {
        surface.draw_image(image, *state.obstacle.hitbox());
    }

    let player = state.player.hitbox();
    if let Some(image) = assets.run_frame(state.player.frame) {
        surface.draw_image(image, *player);
    }
    if state.player.is_shield_active() {
        surface.draw_image(&assets.shield_effect, *player);
        surface.draw_text(
            "ECO SHIELD",
            Vec2::new(player.center().x, player.top() - 10.0),
            &SHIELD_LABEL_STYLE,
        );
    }

    surface.draw_text(
        state.level.label,
        Vec2::new(LEVEL_LABEL_X, HUD_Y),
        &LEVEL_LABEL_STYLE,
    );
    surface.draw_text(
        &format!("Score: {}", state.score()),
        Vec2::new(screen.width / 2.0, HUD_Y),
        &SCORE_STYLE,
    );

    let center = Vec2::new(screen.width / 2.0, screen.height / 2.0);
    match state.phase {
        GamePhase::LevelComplete => surface.draw_text("Level Complete!", center, &BANNER_STYLE),
        GamePhase::Lost => surface.draw_image(
            &assets.lose_text,
            Aabb::new(center - LOSE_TEXT_HALF, center + LOSE_TEXT_HALF),
        ),
        GamePhase::Start | GamePhase::Running => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetId;
    use crate::sim::{LayerDepth, ObstacleKind, Screen};
    use crate::testing::{DrawCall, EchoProvider, RecordingSurface};

    fn frame(state: &GameState) -> Vec<DrawCall> {
        let mut provider = EchoProvider::default();
        let assets = AttemptAssets::resolve(&mut provider, state.level).unwrap();
        let mut surface = RecordingSurface::default();
        render(state, &assets, &mut surface);
        surface.calls
    }

    fn images(calls: &[DrawCall]) -> Vec<AssetId> {
        calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Image(id, _) => Some(*id),
                _ => None,
            })
            .collect()
    }

    fn texts(calls: &[DrawCall]) -> Vec<String> {
        calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text(text, _) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn bg(level: u8, depth: LayerDepth) -> AssetId {
        AssetId::Background { level, depth }
    }

    #[test]
    fn test_back_to_front_order() {
        let mut state = GameState::new(1, Screen::default());
        state.setup_level(1);
        let calls = frame(&state);

        assert_eq!(calls[0], DrawCall::Clear(Color::WHITE));
        let obstacle = match state.obstacle.kind {
            ObstacleKind::PowerUp => AssetId::PowerUp,
            ObstacleKind::Hazard(kind) => AssetId::Hazard(kind),
        };
        assert_eq!(
            images(&calls),
            vec![
                bg(1, LayerDepth::Far),
                bg(1, LayerDepth::Far),
                bg(1, LayerDepth::Mid),
                bg(1, LayerDepth::Mid),
                bg(1, LayerDepth::Near),
                bg(1, LayerDepth::Near),
                obstacle,
                AssetId::PlayerRun(0),
            ]
        );
        assert_eq!(texts(&calls), vec!["LEVEL 1: GREEN HOME", "Score: 0"]);
    }

    #[test]
    fn test_no_mid_layer_on_level_two() {
        let mut state = GameState::new(1, Screen::default());
        state.setup_level(2);
        let calls = frame(&state);
        assert!(!images(&calls).contains(&bg(2, LayerDepth::Mid)));
        assert_eq!(images(&calls)[..4], [
            bg(2, LayerDepth::Far),
            bg(2, LayerDepth::Far),
            bg(2, LayerDepth::Near),
            bg(2, LayerDepth::Near),
        ]);
    }

    #[test]
    fn test_shield_overlay_follows_player() {
        let mut state = GameState::new(1, Screen::default());
        state.setup_level(3);
        state.player.activate_shield(1000);
        let calls = frame(&state);
        let ids = images(&calls);
        let player_at = ids.iter().position(|id| *id == AssetId::PlayerRun(0)).unwrap();
        assert_eq!(ids[player_at + 1], AssetId::ShieldEffect);
        assert!(texts(&calls).contains(&"ECO SHIELD".to_string()));
    }

    #[test]
    fn test_banners() {
        let mut state = GameState::new(1, Screen::default());
        state.setup_level(1);

        state.phase = GamePhase::LevelComplete;
        let calls = frame(&state);
        assert_eq!(texts(&calls).last().map(String::as_str), Some("Level Complete!"));

        state.phase = GamePhase::Lost;
        let calls = frame(&state);
        match calls.last() {
            Some(DrawCall::Image(AssetId::LoseText, dest)) => {
                assert_eq!(dest.center(), Vec2::new(540.0, 1170.0));
                assert_eq!(dest.width(), 1200.0);
            }
            other => panic!("expected loss banner last, got {:?}", other),
        }
    }
}
