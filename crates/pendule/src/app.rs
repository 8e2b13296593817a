use std::time::Instant;

use anyhow::{Context, Result};

use pendule_clock::{Controller, Interaction, SurfaceError, TimeSource};
use pendule_engine::core::{App, AppControl, FrameCtx};
use pendule_engine::input::{
    InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent,
};
use pendule_engine::paint::Color;
use pendule_engine::render::shapes::stroke::StrokeRenderer;
use pendule_engine::scene::Scene;
use pendule_engine::time::TickClock;
use pendule_engine::window::CursorIcon;

/// The overlay: one clock drawn into one retained scene.
pub struct ClockApp<T: TimeSource> {
    scene: Scene,
    controller: Controller<T>,
    interaction: Interaction,
    pacer: TickClock,

    strokes: StrokeRenderer,
    cursor: CursorIcon,
}

impl<T: TimeSource> ClockApp<T> {
    /// Draws the static dial; the first tick is due immediately.
    pub fn new(controller: Controller<T>) -> Result<Self> {
        let mut scene = Scene::new();
        controller
            .draw_static(&mut scene)
            .context("failed to draw the clock face")?;

        let pacer = TickClock::new(controller.tick_period(), Instant::now());

        Ok(Self {
            scene,
            controller,
            interaction: Interaction::new(),
            pacer,
            strokes: StrokeRenderer::new(),
            cursor: CursorIcon::Default,
        })
    }

    fn pointer_button(&mut self, ev: &PointerButtonEvent) -> Result<(), SurfaceError> {
        match ev.state {
            MouseButtonState::Pressed if ev.is_double_click() => {
                if !self.interaction.double_click(ev.pos, &mut self.scene)? {
                    log::debug!("double click after a drag, position kept");
                }
                Ok(())
            }
            MouseButtonState::Pressed => {
                self.interaction.press(ev.pos);
                Ok(())
            }
            MouseButtonState::Released => {
                self.interaction.release();
                Ok(())
            }
        }
    }
}

impl<T: TimeSource> App for ClockApp<T> {
    fn on_input(&mut self, event: &InputEvent, input: &InputState) -> AppControl {
        let res = match event {
            InputEvent::Key { key: Key::Escape, state: KeyState::Pressed, .. } => {
                log::info!("escape pressed, closing");
                return AppControl::Exit;
            }

            InputEvent::PointerButton(ev) if ev.button == MouseButton::Left => self.pointer_button(ev),

            InputEvent::PointerMoved(ev) if input.button_down(MouseButton::Left) => {
                self.interaction.drag(ev.pos, &mut self.scene)
            }

            InputEvent::Focused(false) | InputEvent::PointerLeft => {
                self.interaction.release();
                Ok(())
            }

            _ => return AppControl::Continue,
        };

        match res {
            Ok(()) => AppControl::Redraw,
            Err(err) => {
                log::error!("pointer handling failed: {err}");
                AppControl::Exit
            }
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        Some(self.pacer.next_deadline())
    }

    fn on_deadline(&mut self, now: Instant) -> AppControl {
        self.pacer.begin(now);

        match self.controller.tick(&mut self.scene) {
            Ok(report) => {
                let tt = self.pacer.finish(Instant::now());
                log::trace!(
                    "tick {} took {:?} (resynced: {}), next in {:?}",
                    report.tick_index,
                    tt.elapsed,
                    report.resynced,
                    tt.delay
                );
                AppControl::Redraw
            }
            Err(err) => {
                log::error!("clock tick failed, stopping: {err}");
                AppControl::Exit
            }
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let cursor = if self.interaction.is_dragging() {
            CursorIcon::Grabbing
        } else {
            CursorIcon::Default
        };
        if cursor != self.cursor {
            ctx.window.set_cursor(cursor);
            self.cursor = cursor;
        }

        let scene = &mut self.scene;
        let strokes = &mut self.strokes;
        ctx.render(Color::transparent(), |rctx, target| {
            strokes.render(rctx, target, scene);
        })
    }

    fn on_exit(&mut self) {
        self.scene.close();
        log::info!("clock stopped after {} ticks", self.controller.total_ticks());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pendule_clock::{ClockConfig, FixedTimeSource, HandKind};
    use pendule_engine::coords::Vec2;
    use pendule_engine::input::{Modifiers, PointerMoveEvent};
    use pendule_engine::scene::Tags;

    use super::*;

    fn app() -> ClockApp<FixedTimeSource> {
        let controller = Controller::new(ClockConfig::default(), FixedTimeSource::hms(9, 30, 0)).unwrap();
        ClockApp::new(controller).unwrap()
    }

    fn button(state: MouseButtonState, pos: Vec2, click_count: u8) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            pos,
            click_count,
            modifiers: Modifiers::default(),
        })
    }

    /// Applies `ev` to `input` first, the way the runtime does.
    fn feed(app: &mut ClockApp<FixedTimeSource>, input: &mut InputState, ev: InputEvent) -> AppControl {
        input.apply_event(&ev);
        app.on_input(&ev, input)
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { pos: Vec2::new(x, y) })
    }

    // ── startup ───────────────────────────────────────────────────────────

    #[test]
    fn new_draws_static_dial_and_is_due() {
        let app = app();
        assert!(!app.scene.is_empty());
        assert!(app.scene.items().iter().all(|i| !i.tags.contains(Tags::REMOVABLE)));
        assert!(app.next_deadline().is_some_and(|d| d <= Instant::now()));
    }

    // ── on_deadline ───────────────────────────────────────────────────────

    #[test]
    fn deadline_ticks_and_schedules_next_second() {
        let mut app = app();
        let now = Instant::now();

        assert_eq!(app.on_deadline(now), AppControl::Redraw);
        assert_eq!(app.controller.total_ticks(), 1);
        assert_eq!(app.controller.hand(HandKind::Second).unwrap().current_step(), 1);

        let next = app.next_deadline().unwrap();
        assert!(next > now);
        assert!(next <= now + Duration::from_secs(1) + Duration::from_millis(100));
    }

    #[test]
    fn tick_after_exit_stops_the_loop() {
        let mut app = app();
        app.on_exit();
        assert_eq!(app.on_deadline(Instant::now()), AppControl::Exit);
    }

    // ── on_input ──────────────────────────────────────────────────────────

    #[test]
    fn escape_exits() {
        let mut app = app();
        let ev = InputEvent::Key {
            key: Key::Escape,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        };
        assert_eq!(app.on_input(&ev, &InputState::default()), AppControl::Exit);
    }

    #[test]
    fn drag_then_double_click_round_trip() {
        let mut app = app();
        let mut input = InputState::default();

        feed(&mut app, &mut input, button(MouseButtonState::Pressed, Vec2::new(5.0, 5.0), 1));
        assert_eq!(feed(&mut app, &mut input, moved(15.0, 20.0)), AppControl::Redraw);
        assert!(app.interaction.is_dragging());
        feed(&mut app, &mut input, button(MouseButtonState::Released, Vec2::new(15.0, 20.0), 0));
        assert_eq!(app.scene.pan_offset(), Vec2::new(10.0, 15.0));

        feed(&mut app, &mut input, button(MouseButtonState::Pressed, Vec2::new(15.0, 20.0), 1));
        feed(&mut app, &mut input, button(MouseButtonState::Released, Vec2::new(15.0, 20.0), 0));
        feed(&mut app, &mut input, button(MouseButtonState::Pressed, Vec2::new(15.0, 20.0), 2));
        assert_eq!(app.scene.pan_offset(), Vec2::zero());

        // Moving while the second press is still held does not start a new drag.
        feed(&mut app, &mut input, moved(30.0, 30.0));
        assert_eq!(app.scene.pan_offset(), Vec2::zero());
    }

    #[test]
    fn drag_between_presses_cancels_reset() {
        let mut app = app();
        let mut input = InputState::default();

        feed(&mut app, &mut input, button(MouseButtonState::Pressed, Vec2::new(5.0, 5.0), 1));
        feed(&mut app, &mut input, moved(7.0, 7.0));
        feed(&mut app, &mut input, button(MouseButtonState::Released, Vec2::new(7.0, 7.0), 0));
        assert_eq!(app.scene.pan_offset(), Vec2::new(2.0, 2.0));

        // Quick and close enough to count as a double click.
        let ctl = feed(&mut app, &mut input, button(MouseButtonState::Pressed, Vec2::new(7.0, 7.0), 2));
        assert_eq!(ctl, AppControl::Redraw);
        assert_eq!(app.scene.pan_offset(), Vec2::new(2.0, 2.0));
        assert!(!app.interaction.is_dragging());

        feed(&mut app, &mut input, moved(9.0, 7.0));
        assert!(app.interaction.is_dragging());
        assert_eq!(app.scene.pan_offset(), Vec2::new(4.0, 2.0));
    }

    #[test]
    fn hover_without_button_does_not_drag() {
        let mut app = app();
        let mut input = InputState::default();
        assert_eq!(feed(&mut app, &mut input, moved(40.0, 40.0)), AppControl::Continue);
        assert_eq!(app.scene.pan_offset(), Vec2::zero());
    }
}
