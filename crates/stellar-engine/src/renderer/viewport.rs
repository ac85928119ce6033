/// Host render surface size in CSS pixels plus the effective pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio after capping.
    pub pixel_ratio: f32,
    /// Upper bound applied to the device pixel ratio.
    pub max_pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            pixel_ratio: 1.0,
            max_pixel_ratio: 2.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32, max_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
            max_pixel_ratio,
        }
    }

    /// Resize the surface and recompute the capped pixel ratio.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        self.width = width;
        self.height = height;
        self.pixel_ratio = device_pixel_ratio.min(self.max_pixel_ratio);
    }

    /// Width / height. Degenerate surfaces report 1.0.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Backing-store size in device pixels.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped() {
        let mut vp = Viewport::default();
        vp.resize(800.0, 600.0, 3.0);
        assert_eq!(vp.pixel_ratio, 2.0);
        vp.resize(800.0, 600.0, 1.5);
        assert_eq!(vp.pixel_ratio, 1.5);
    }

    #[test]
    fn drawing_buffer_scales_with_ratio() {
        let mut vp = Viewport::default();
        vp.resize(800.0, 600.0, 2.0);
        assert_eq!(vp.drawing_buffer_size(), (1600, 1200));
    }

    #[test]
    fn zero_height_aspect_falls_back() {
        let mut vp = Viewport::default();
        vp.resize(800.0, 0.0, 1.0);
        assert!(vp.is_degenerate());
        assert_eq!(vp.aspect(), 1.0);
    }
}
