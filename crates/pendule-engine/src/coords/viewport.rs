use super::Vec2;

/// Drawable area of a window: logical size plus the DPI scale.
///
/// Scene geometry lives in logical pixels; `scale_factor` converts to
/// physical pixels (`physical = logical * scale_factor`), which is the unit
/// antialiasing is measured in.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32, scale_factor: f32) -> Self {
        Self { width, height, scale_factor }
    }

    /// Builds a viewport from a surface size in physical pixels.
    pub fn from_physical(width_px: u32, height_px: u32, scale_factor: f64) -> Self {
        let scale = if scale_factor.is_finite() && scale_factor > 0.0 { scale_factor } else { 1.0 };
        Self::new(
            (width_px as f64 / scale) as f32,
            (height_px as f64 / scale) as f32,
            scale as f32,
        )
    }

    #[inline]
    pub fn size(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True when a renderer can map logical coordinates onto it.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.scale_factor > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
            && self.scale_factor.is_finite()
    }

    /// Logical point to normalized device coordinates (+y up).
    pub fn to_ndc(self, p: Vec2) -> Vec2 {
        Vec2::new(p.x / self.width * 2.0 - 1.0, 1.0 - p.y / self.height * 2.0)
    }
}
