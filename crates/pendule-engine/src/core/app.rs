use std::time::Instant;

use crate::input::{InputEvent, InputState};

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    /// Keep running; nothing on screen changed.
    Continue,
    /// Keep running and repaint the window.
    Redraw,
    /// Leave the event loop (`on_exit` still runs).
    Exit,
}

/// Application contract implemented by higher layers.
///
/// All callbacks run on the event-loop thread. Periodic work is scheduled
/// cooperatively: the runtime sleeps until [`next_deadline`](App::next_deadline)
/// and then calls [`on_deadline`](App::on_deadline), so an app never needs a
/// thread of its own to drive the window.
pub trait App {
    /// Called for every input event, after `input` has been updated with it.
    fn on_input(&mut self, event: &InputEvent, input: &InputState) -> AppControl {
        let _ = (event, input);
        AppControl::Continue
    }

    /// Instant at which the app next wants `on_deadline`. `None` sleeps until input.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    /// Called once the deadline returned by `next_deadline` has passed.
    fn on_deadline(&mut self, now: Instant) -> AppControl {
        let _ = now;
        AppControl::Continue
    }

    /// Called when the window needs repainting.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Called once before the event loop exits, whatever the cause.
    fn on_exit(&mut self) {}
}
