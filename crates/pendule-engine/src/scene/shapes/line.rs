use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, Handle, Scene, SceneError, Tags};

/// Straight stroke between two points, with round caps.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub p0: Vec2,
    pub p1: Vec2,
    pub width: f32,
    pub color: Color,
}

impl LineCmd {
    #[inline]
    pub fn new(p0: Vec2, p1: Vec2, width: f32, color: Color) -> Self {
        Self { p0, p1, width, color }
    }
}

impl Scene {
    /// Records a line; it becomes the topmost primitive.
    #[inline]
    pub fn draw_line(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        width: f32,
        color: Color,
        tags: Tags,
    ) -> Result<Handle, SceneError> {
        self.push(tags, DrawCmd::Line(LineCmd::new(p0, p1, width, color)))
    }
}
