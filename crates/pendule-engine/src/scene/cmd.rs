use crate::coords::Vec2;
use crate::scene::shapes::dot::DotCmd;
use crate::scene::shapes::line::LineCmd;

/// Renderer-agnostic primitive stored in the scene.
///
/// Extending the scene:
/// - add a new shape module under `scene::shapes::*`
/// - add a new variant here and to `translate`
/// - implement a draw helper inside that shape module
/// - teach `render::shapes::stroke` how to emit it
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Line(LineCmd),
    Dot(DotCmd),
}

impl DrawCmd {
    /// Shifts every point of the primitive by `delta`.
    pub fn translate(&mut self, delta: Vec2) {
        match self {
            DrawCmd::Line(line) => {
                line.p0 += delta;
                line.p1 += delta;
            }
            DrawCmd::Dot(dot) => dot.center += delta,
        }
    }
}
