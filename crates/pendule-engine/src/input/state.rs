use std::collections::HashSet;
use std::time::{Duration, Instant};

use crate::coords::Vec2;

use super::types::{
    InputEvent,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Maximum time between two presses of a double click.
pub const DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

/// Maximum pointer travel (logical px) between two presses of a double click.
pub const DOUBLE_CLICK_SLOP: f32 = 4.0;

#[derive(Debug, Copy, Clone)]
struct LastPress {
    button: MouseButton,
    at: Instant,
    pos: Vec2,
    count: u8,
}

/// Current input state for a single window.
///
/// Holds "is down" information, the current pointer position and the data
/// needed to recognize double clicks.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<Vec2>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    last_press: Option<LastPress>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoids stuck buttons when focus changes mid-press.
                    self.buttons_down.clear();
                    self.last_press = None;
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { pos }) => {
                self.pointer_pos = Some(*pos);
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                pos,
                modifiers,
                ..
            }) => {
                self.pointer_pos = Some(*pos);
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }
        }
    }

    /// Registers a button press and returns its click count.
    ///
    /// A press of the same button within [`DOUBLE_CLICK_INTERVAL`] and
    /// [`DOUBLE_CLICK_SLOP`] of a single press counts as 2; anything else
    /// (including a third quick press) starts over at 1.
    pub fn count_click(&mut self, button: MouseButton, pos: Vec2, now: Instant) -> u8 {
        let count = match self.last_press {
            Some(prev)
                if prev.count == 1
                    && prev.button == button
                    && now.saturating_duration_since(prev.at) <= DOUBLE_CLICK_INTERVAL
                    && prev.pos.distance(pos) <= DOUBLE_CLICK_SLOP =>
            {
                2
            }
            _ => 1,
        };

        self.last_press = Some(LastPress { button, at: now, pos, count });
        count
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            pos: Vec2::new(x, y),
            click_count: 1,
            modifiers: Modifiers::default(),
        })
    }

    // ── apply_event ───────────────────────────────────────────────────────

    #[test]
    fn press_tracks_button_and_pointer() {
        let mut state = InputState::default();
        state.apply_event(&press(MouseButton::Left, 5.0, 6.0));
        assert!(state.button_down(MouseButton::Left));
        assert_eq!(state.pointer_pos, Some(Vec2::new(5.0, 6.0)));
    }

    #[test]
    fn focus_loss_clears_held_buttons() {
        let mut state = InputState::default();
        state.apply_event(&press(MouseButton::Left, 0.0, 0.0));
        state.apply_event(&InputEvent::Focused(false));
        assert!(!state.button_down(MouseButton::Left));
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut state = InputState::default();
        state.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { pos: Vec2::new(1.0, 1.0) }));
        state.apply_event(&InputEvent::PointerLeft);
        assert_eq!(state.pointer_pos, None);
    }

    // ── count_click ───────────────────────────────────────────────────────

    #[test]
    fn quick_second_press_is_double_click() {
        let mut state = InputState::default();
        let t0 = Instant::now();
        let p = Vec2::new(10.0, 10.0);
        assert_eq!(state.count_click(MouseButton::Left, p, t0), 1);
        assert_eq!(state.count_click(MouseButton::Left, p, t0 + Duration::from_millis(200)), 2);
    }

    #[test]
    fn slow_second_press_is_single_click() {
        let mut state = InputState::default();
        let t0 = Instant::now();
        let p = Vec2::new(10.0, 10.0);
        state.count_click(MouseButton::Left, p, t0);
        assert_eq!(state.count_click(MouseButton::Left, p, t0 + Duration::from_millis(800)), 1);
    }

    #[test]
    fn far_second_press_is_single_click() {
        let mut state = InputState::default();
        let t0 = Instant::now();
        state.count_click(MouseButton::Left, Vec2::new(0.0, 0.0), t0);
        let far = Vec2::new(20.0, 0.0);
        assert_eq!(state.count_click(MouseButton::Left, far, t0 + Duration::from_millis(100)), 1);
    }

    #[test]
    fn other_button_does_not_complete_double_click() {
        let mut state = InputState::default();
        let t0 = Instant::now();
        let p = Vec2::zero();
        state.count_click(MouseButton::Left, p, t0);
        assert_eq!(state.count_click(MouseButton::Right, p, t0 + Duration::from_millis(50)), 1);
    }

    #[test]
    fn third_quick_press_starts_over() {
        let mut state = InputState::default();
        let t0 = Instant::now();
        let p = Vec2::zero();
        state.count_click(MouseButton::Left, p, t0);
        state.count_click(MouseButton::Left, p, t0 + Duration::from_millis(100));
        assert_eq!(state.count_click(MouseButton::Left, p, t0 + Duration::from_millis(200)), 1);
    }
}
