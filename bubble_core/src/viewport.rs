use crate::{ConfigError, Params};
use glam::Vec2;

/// Visible area the bubbles float in, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::Viewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Range of centre positions that keep a circle fully on screen.
    /// Collapses to the centre line on an axis narrower than the circle.
    pub fn center_range(&self, radius: f32) -> (Vec2, Vec2) {
        let axis = |extent: f32| {
            if extent >= radius * 2.0 {
                (radius, extent - radius)
            } else {
                (extent / 2.0, extent / 2.0)
            }
        };
        let (min_x, max_x) = axis(self.width);
        let (min_y, max_y) = axis(self.height);
        (Vec2::new(min_x, min_y), Vec2::new(max_x, max_y))
    }

    /// Clamp a centre into [`Self::center_range`]
    pub fn clamp_center(&self, pos: Vec2, radius: f32) -> Vec2 {
        let (min, max) = self.center_range(radius);
        pos.clamp(min, max)
    }

    /// Whether the whole circle is visible
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x - radius >= 0.0
            && pos.x + radius <= self.width
            && pos.y - radius >= 0.0
            && pos.y + radius <= self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: Params::VIEWPORT_WIDTH,
            height: Params::VIEWPORT_HEIGHT,
        }
    }
}
