//! World/screen mapping for the viewport

use glam::Vec2;

/// Scale drops below this and `screen_to_world` stops meaning anything.
const MIN_SCALE: f32 = 0.05;

/// Pan offset plus uniform zoom. World space has y up and its origin at
/// the viewport center; screen space has y down with the origin in the
/// top-left corner, so both mappings flip the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Pan, applied after scaling (screen units).
    pub offset: Vec2,
    pub scale: f32,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    pub fn world_to_screen(&self, center: Vec2, world: Vec2) -> Vec2 {
        let v = world * self.scale + self.offset;
        Vec2::new(center.x + v.x, center.y - v.y)
    }

    pub fn screen_to_world(&self, center: Vec2, screen: Vec2) -> Vec2 {
        let v = Vec2::new(screen.x - center.x, center.y - screen.y);
        (v - self.offset) / self.scale
    }

    /// Wheel zoom; the delta adds onto the scale directly.
    pub fn zoom_by(&mut self, delta: f32) {
        self.scale = (self.scale + delta).max(MIN_SCALE);
    }
}
