use crate::coords::Vec2;

/// Keyboard key identifier.
///
/// Only the keys the overlay reacts to are named; everything else maps to
/// `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Pointer move event in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerMoveEvent {
    pub pos: Vec2,
}

/// Pointer button event.
///
/// `click_count` is 1 for a single press and 2 when the press completes a
/// double click (see [`InputState::count_click`](super::InputState::count_click)).
/// It is always 0 for releases.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
    pub pos: Vec2,
    pub click_count: u8,
    pub modifiers: Modifiers,
}

impl PointerButtonEvent {
    #[inline]
    pub fn is_double_click(&self) -> bool {
        self.state == MouseButtonState::Pressed && self.click_count >= 2
    }
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved(PointerMoveEvent),
    PointerButton(PointerButtonEvent),

    /// Pointer left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left(state: MouseButtonState, click_count: u8) -> PointerButtonEvent {
        PointerButtonEvent {
            button: MouseButton::Left,
            state,
            pos: Vec2::zero(),
            click_count,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn only_second_press_is_double_click() {
        assert!(!left(MouseButtonState::Pressed, 1).is_double_click());
        assert!(left(MouseButtonState::Pressed, 2).is_double_click());
        assert!(!left(MouseButtonState::Released, 2).is_double_click());
    }
}
