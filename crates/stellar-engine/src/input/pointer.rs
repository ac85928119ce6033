use glam::Vec2;
use crate::renderer::viewport::Viewport;

/// Most recent pointer sample in normalized device coordinates:
/// [-1, 1] on both axes, +Y up, origin at the viewport centre.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub ndc: Vec2,
}

impl Pointer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from client coordinates (CSS pixels, origin top-left, +Y down).
    pub fn set_client(&mut self, x: f32, y: f32, viewport: &Viewport) {
        self.ndc = Vec2::new(
            (x / viewport.width) * 2.0 - 1.0,
            -(y / viewport.height) * 2.0 + 1.0,
        );
    }
}
