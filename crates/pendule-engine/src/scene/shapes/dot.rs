use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, Handle, Scene, SceneError, Tags};

/// Filled disc.
#[derive(Debug, Clone, PartialEq)]
pub struct DotCmd {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl DotCmd {
    #[inline]
    pub fn new(center: Vec2, radius: f32, color: Color) -> Self {
        Self { center, radius, color }
    }
}

impl Scene {
    /// Records a dot; it becomes the topmost primitive.
    #[inline]
    pub fn draw_dot(
        &mut self,
        center: Vec2,
        radius: f32,
        color: Color,
        tags: Tags,
    ) -> Result<Handle, SceneError> {
        self.push(tags, DrawCmd::Dot(DotCmd::new(center, radius, color)))
    }
}
