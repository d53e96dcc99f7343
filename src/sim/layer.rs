//! Scrolling parallax background layers
//!
//! A layer is a one-dimensional offset that wraps at the screen width; the
//! renderer tiles the image twice to cover the seam.

use serde::{Deserialize, Serialize};

use super::level::LevelConfig;

/// Back-to-front position of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerDepth {
    Far,
    Mid,
    Near,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayer {
    pub depth: LayerDepth,
    /// Leftward scroll per tick
    pub speed: f32,
    /// Current scroll offset in `[0, span)`
    pub offset: f32,
    /// Wrap distance (the screen width)
    pub span: f32,
}

impl ParallaxLayer {
    pub fn new(depth: LayerDepth, speed: f32, span: f32) -> Self {
        Self {
            depth,
            speed,
            offset: 0.0,
            span,
        }
    }

    pub fn update(&mut self, _elapsed_ms: i64) {
        if self.span <= 0.0 {
            return;
        }
        self.offset = (self.offset + self.speed).rem_euclid(self.span);
    }

    /// Left edges of the two image tiles covering the screen
    pub fn draw_offsets(&self) -> [f32; 2] {
        [-self.offset, self.span - self.offset]
    }
}

/// The background stack for one attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxLayers {
    pub far: ParallaxLayer,
    pub mid: Option<ParallaxLayer>,
    pub near: ParallaxLayer,
}

impl ParallaxLayers {
    pub fn for_level(level: &LevelConfig, span: f32) -> Self {
        Self {
            far: ParallaxLayer::new(LayerDepth::Far, level.far_speed, span),
            mid: level
                .mid_speed
                .map(|speed| ParallaxLayer::new(LayerDepth::Mid, speed, span)),
            near: ParallaxLayer::new(LayerDepth::Near, level.near_speed, span),
        }
    }

    pub fn update(&mut self, elapsed_ms: i64) {
        for layer in self.iter_mut() {
            layer.update(elapsed_ms);
        }
    }

    /// Add `step` to the speed of every present layer
    pub fn boost(&mut self, step: f32) {
        for layer in self.iter_mut() {
            layer.speed += step;
        }
    }

    /// Present layers, back to front
    pub fn iter(&self) -> impl Iterator<Item = &ParallaxLayer> {
        std::iter::once(&self.far)
            .chain(self.mid.as_ref())
            .chain(std::iter::once(&self.near))
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut ParallaxLayer> {
        std::iter::once(&mut self.far)
            .chain(self.mid.as_mut())
            .chain(std::iter::once(&mut self.near))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_wraps() {
        let mut layer = ParallaxLayer::new(LayerDepth::Near, 8.0, 20.0);
        layer.update(16);
        layer.update(16);
        assert_eq!(layer.offset, 16.0);
        layer.update(16);
        assert_eq!(layer.offset, 4.0);
        assert_eq!(layer.draw_offsets(), [-4.0, 16.0]);
    }

    #[test]
    fn test_level_one_has_mid_layer() {
        let layers = ParallaxLayers::for_level(LevelConfig::resolve(1), 1080.0);
        let depths: Vec<_> = layers.iter().map(|l| l.depth).collect();
        assert_eq!(depths, vec![LayerDepth::Far, LayerDepth::Mid, LayerDepth::Near]);
    }

    #[test]
    fn test_boost_skips_missing_mid() {
        let mut layers = ParallaxLayers::for_level(LevelConfig::resolve(2), 1080.0);
        assert!(layers.mid.is_none());
        layers.boost(2.0);
        assert_eq!(layers.near.speed, 12.0);
        assert_eq!(layers.far.speed, 8.0);
        assert_eq!(layers.iter().count(), 2);
    }
}
