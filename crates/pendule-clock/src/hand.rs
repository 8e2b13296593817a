use pendule_engine::coords::Vec2;
use pendule_engine::paint::Color;
use pendule_engine::scene::{Handle, Tags};

use crate::config::{HandKind, HandSpec};
use crate::error::{ClockError, ClockResult, SurfaceError};
use crate::geometry::{CircularPoint, EndpointPair, build_pairs};
use crate::surface::RenderSurface;

/// Hands are redrawn every tick and follow drags.
pub const HAND_TAGS: Tags = Tags::DRAGGABLE.union(Tags::REMOVABLE);

/// One clock hand: a precomputed lap of positions and a cursor into it.
#[derive(Debug, Clone)]
pub struct Hand {
    kind: HandKind,
    width: f32,
    color: Color,
    pairs: Vec<EndpointPair>,
    current_step: u32,
}

impl Hand {
    /// Precomputes every position of the lap. The hand starts at step 0.
    ///
    /// A hand needs at least one position to step through.
    pub fn new(spec: &HandSpec, center: Vec2) -> ClockResult<Self> {
        if spec.period == 0 {
            return Err(ClockError::Setup(format!("{:?} hand period must be non-zero", spec.kind)));
        }

        let inner = CircularPoint::new(center, spec.inner_radius);
        let outer = CircularPoint::new(center, spec.outer_radius);

        Ok(Self {
            kind: spec.kind,
            width: spec.width,
            color: spec.color,
            pairs: build_pairs(&inner, &outer, spec.period),
            current_step: 0,
        })
    }

    #[inline]
    pub fn kind(&self) -> HandKind {
        self.kind
    }

    /// Positions per lap.
    #[inline]
    pub fn period(&self) -> u32 {
        self.pairs.len() as u32
    }

    #[inline]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    #[inline]
    pub fn pairs(&self) -> &[EndpointPair] {
        &self.pairs
    }

    /// Endpoints at the current step, before panning.
    #[inline]
    pub fn current_pair(&self) -> EndpointPair {
        self.pairs[self.current_step as usize]
    }

    /// Jumps to the absolute position for `now_seconds`.
    pub fn setup(&mut self, now_seconds: u64) {
        self.current_step = (now_seconds % self.period() as u64) as u32;
    }

    /// Advances one position, wrapping at the end of the lap.
    pub fn step(&mut self) {
        self.current_step = (self.current_step + 1) % self.period();
    }

    /// Draws the current position, shifted by the surface's pan offset.
    pub fn draw(&self, surface: &mut dyn RenderSurface) -> Result<Handle, SurfaceError> {
        let pair = self.current_pair().translated(surface.pan_offset());
        surface.draw_line(pair.inner, pair.outer, self.width, self.color, HAND_TAGS)
    }
}
