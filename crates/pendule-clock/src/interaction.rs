use pendule_engine::coords::Vec2;
use pendule_engine::scene::Tags;

use crate::error::SurfaceError;
use crate::surface::RenderSurface;

/// Drag/reset gesture state.
///
/// `Idle --press--> Pressed --drag--> Dragging --release--> Idle`
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum DragState {
    Idle,
    /// Button held; `last` is where the pointer was seen last.
    Pressed { last: Vec2 },
    Dragging { last: Vec2 },
}

/// Moves every draggable primitive with the pointer and snaps them back on
/// double click.
#[derive(Debug, Clone)]
pub struct Interaction {
    state: DragState,
    /// The last finished gesture moved the clock.
    dragged_last: bool,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new()
    }
}

impl Interaction {
    pub const fn new() -> Self {
        Self {
            state: DragState::Idle,
            dragged_last: false,
        }
    }

    #[inline]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Captures the pointer origin.
    pub fn press(&mut self, pos: Vec2) {
        self.state = DragState::Pressed { last: pos };
    }

    /// Shifts draggable primitives by the pointer movement since the last
    /// event and accumulates it into the pan offset. Ignored while idle.
    pub fn drag(&mut self, pos: Vec2, surface: &mut dyn RenderSurface) -> Result<(), SurfaceError> {
        let last = match self.state {
            DragState::Idle => return Ok(()),
            DragState::Pressed { last } | DragState::Dragging { last } => last,
        };

        let delta = pos - last;
        if delta == Vec2::zero() {
            return Ok(());
        }

        surface.move_by_tag(Tags::DRAGGABLE, delta)?;
        surface.set_pan_offset(surface.pan_offset() + delta);
        self.state = DragState::Dragging { last: pos };
        Ok(())
    }

    pub fn release(&mut self) {
        if self.state != DragState::Idle {
            self.dragged_last = self.is_dragging();
        }
        self.state = DragState::Idle;
    }

    /// Handles the second press of a double click at `pos`.
    ///
    /// Undoes every drag so far: draggable primitives return to where they
    /// were first drawn and the pan offset goes back to zero. When the first
    /// press of the pair turned into a drag, nothing is reset and the press
    /// starts a new gesture instead. Returns whether the reset happened.
    pub fn double_click(&mut self, pos: Vec2, surface: &mut dyn RenderSurface) -> Result<bool, SurfaceError> {
        if self.dragged_last {
            self.press(pos);
            return Ok(false);
        }

        let pan = surface.pan_offset();
        if pan != Vec2::zero() {
            surface.move_by_tag(Tags::DRAGGABLE, -pan)?;
            surface.set_pan_offset(Vec2::zero());
            log::debug!("clock position reset (was panned by {}, {})", pan.x, pan.y);
        }
        self.state = DragState::Idle;
        Ok(true)
    }
}
