//! Test doubles for the host seams

use glam::Vec2;

use crate::assets::{AssetId, AssetProvider};
use crate::render::{Color, Surface, TextStyle};
use crate::sim::Aabb;

/// Provider whose image handles are the ids themselves
#[derive(Debug, Default)]
pub struct EchoProvider {
    pub missing: Vec<AssetId>,
    pub requested: Vec<AssetId>,
}

impl EchoProvider {
    pub fn without(missing: &[AssetId]) -> Self {
        Self {
            missing: missing.to_vec(),
            requested: Vec::new(),
        }
    }
}

impl AssetProvider for EchoProvider {
    type Image = AssetId;

    fn load(&mut self, id: AssetId) -> Option<AssetId> {
        self.requested.push(id);
        (!self.missing.contains(&id)).then_some(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Color),
    Image(AssetId, Aabb),
    Text(String, Vec2),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl Surface for RecordingSurface {
    type Image = AssetId;

    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_image(&mut self, image: &AssetId, dest: Aabb) {
        self.calls.push(DrawCall::Image(*image, dest));
    }

    fn draw_text(&mut self, text: &str, anchor: Vec2, _style: &TextStyle) {
        self.calls.push(DrawCall::Text(text.to_string(), anchor));
    }
}
