use pendule_engine::coords::Vec2;
use pendule_engine::paint::Color;
use pendule_engine::scene::{Handle, Tags};

use crate::config::{PinSpec, ScaleSpec};
use crate::error::SurfaceError;
use crate::geometry::{CircularPoint, EndpointPair, build_pairs};
use crate::surface::RenderSurface;

/// Graduations are drawn once and only ever moved.
pub const SCALE_TAGS: Tags = Tags::DRAGGABLE;

/// The pin is re-raised above the hands after every tick.
pub const PIN_TAGS: Tags = Tags::DRAGGABLE.union(Tags::ALWAYS_TOP);

/// A static ring of graduation marks.
#[derive(Debug, Clone)]
pub struct Scale {
    width: f32,
    color: Color,
    marks: Vec<EndpointPair>,
}

impl Scale {
    pub fn new(spec: &ScaleSpec, center: Vec2) -> Self {
        let inner = CircularPoint::new(center, spec.inner_radius);
        let outer = CircularPoint::new(center, spec.outer_radius);

        Self {
            width: spec.width,
            color: spec.color,
            marks: build_pairs(&inner, &outer, spec.divisions),
        }
    }

    #[inline]
    pub fn marks(&self) -> &[EndpointPair] {
        &self.marks
    }

    /// Draws every mark, shifted by the surface's pan offset.
    pub fn draw(&self, surface: &mut dyn RenderSurface) -> Result<Vec<Handle>, SurfaceError> {
        let pan = surface.pan_offset();
        self.marks
            .iter()
            .map(|mark| {
                let mark = mark.translated(pan);
                surface.draw_line(mark.inner, mark.outer, self.width, self.color, SCALE_TAGS)
            })
            .collect()
    }
}

/// Dot covering the hands' common origin.
#[derive(Debug, Clone)]
pub struct Pin {
    center: Vec2,
    radius: f32,
    color: Color,
}

impl Pin {
    pub fn new(spec: &PinSpec, center: Vec2) -> Self {
        Self {
            center,
            radius: spec.radius,
            color: spec.color,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) -> Result<Handle, SurfaceError> {
        let center = self.center + surface.pan_offset();
        surface.draw_dot(center, self.radius, self.color, PIN_TAGS)
    }
}
