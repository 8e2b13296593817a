//! Drawing target the clock core issues primitives to.

use pendule_engine::coords::Vec2;
use pendule_engine::paint::Color;
use pendule_engine::scene::{Handle, Scene, Tags};

use crate::error::SurfaceError;

/// Abstract, retained drawing surface.
///
/// The surface owns the pan offset. Drawing never applies it: callers add it
/// to new geometry themselves, and [`move_by_tag`](Self::move_by_tag) shifts
/// what is already drawn.
pub trait RenderSurface {
    fn draw_line(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        width: f32,
        color: Color,
        tags: Tags,
    ) -> Result<Handle, SurfaceError>;

    fn draw_dot(&mut self, center: Vec2, radius: f32, color: Color, tags: Tags) -> Result<Handle, SurfaceError>;

    /// Removes every primitive carrying any of `tags`.
    fn erase_by_tag(&mut self, tags: Tags) -> Result<(), SurfaceError>;

    /// Moves every primitive carrying any of `tags` above all others.
    fn raise_by_tag(&mut self, tags: Tags) -> Result<(), SurfaceError>;

    fn move_by_tag(&mut self, tags: Tags, delta: Vec2) -> Result<(), SurfaceError>;

    fn pan_offset(&self) -> Vec2;

    fn set_pan_offset(&mut self, pan: Vec2);
}

impl RenderSurface for Scene {
    fn draw_line(
        &mut self,
        p0: Vec2,
        p1: Vec2,
        width: f32,
        color: Color,
        tags: Tags,
    ) -> Result<Handle, SurfaceError> {
        Ok(Scene::draw_line(self, p0, p1, width, color, tags)?)
    }

    fn draw_dot(&mut self, center: Vec2, radius: f32, color: Color, tags: Tags) -> Result<Handle, SurfaceError> {
        Ok(Scene::draw_dot(self, center, radius, color, tags)?)
    }

    fn erase_by_tag(&mut self, tags: Tags) -> Result<(), SurfaceError> {
        Scene::erase_by_tag(self, tags)?;
        Ok(())
    }

    fn raise_by_tag(&mut self, tags: Tags) -> Result<(), SurfaceError> {
        Ok(Scene::raise_by_tag(self, tags)?)
    }

    fn move_by_tag(&mut self, tags: Tags, delta: Vec2) -> Result<(), SurfaceError> {
        Ok(Scene::move_by_tag(self, tags, delta)?)
    }

    fn pan_offset(&self) -> Vec2 {
        Scene::pan_offset(self)
    }

    fn set_pan_offset(&mut self, pan: Vec2) {
        Scene::set_pan_offset(self, pan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Color {
        Color::from_straight(1.0, 1.0, 1.0, 1.0)
    }

    fn surface() -> Scene {
        Scene::new()
    }

    #[test]
    fn scene_adapter_forwards_draws() {
        let mut s = surface();
        let s: &mut dyn RenderSurface = &mut s;
        s.draw_line(Vec2::zero(), Vec2::new(1.0, 1.0), 1.0, white(), Tags::REMOVABLE).unwrap();
        s.draw_dot(Vec2::zero(), 2.0, white(), Tags::ALWAYS_TOP).unwrap();
        s.erase_by_tag(Tags::REMOVABLE).unwrap();
        s.raise_by_tag(Tags::ALWAYS_TOP).unwrap();
    }

    #[test]
    fn scene_adapter_owns_pan_offset() {
        let mut s = surface();
        RenderSurface::set_pan_offset(&mut s, Vec2::new(3.0, 4.0));
        assert_eq!(RenderSurface::pan_offset(&s), Vec2::new(3.0, 4.0));
        assert_eq!(s.pan_offset(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn closed_scene_reports_surface_error() {
        let mut s = surface();
        s.close();
        let err = RenderSurface::draw_dot(&mut s, Vec2::zero(), 1.0, white(), Tags::empty()).unwrap_err();
        assert_eq!(err, SurfaceError::Closed);
        assert_eq!(
            RenderSurface::move_by_tag(&mut s, Tags::DRAGGABLE, Vec2::new(1.0, 0.0)),
            Err(SurfaceError::Closed)
        );
    }
}
