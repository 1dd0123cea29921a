use crate::geometry::Point;

/// Mouse button identifier (decoupled from any windowing backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Platform key code. Values the toolkit does not recognize fall through
/// every handler unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: Self = Self(8);
    pub const TAB: Self = Self(9);
    pub const ENTER: Self = Self(13);
    pub const ESCAPE: Self = Self(27);
    pub const SPACE: Self = Self(32);
    pub const END: Self = Self(35);
    pub const HOME: Self = Self(36);
    pub const LEFT: Self = Self(37);
    pub const UP: Self = Self(38);
    pub const RIGHT: Self = Self(39);
    pub const DOWN: Self = Self(40);
    pub const DELETE: Self = Self(46);
}

/// Input delivered to `Master::event`, produced by a platform adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PointerMove { pos: Point, button: MouseButton },
    PointerDown { pos: Point, button: MouseButton },
    PointerUp { pos: Point, button: MouseButton },
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// Committed text (after IME / keyboard layout processing).
    TextInput(String),
    /// Wheel delta in lines. Positive `dy` scrolls toward the top.
    /// Carries no position; routed to whatever is under the last pointer.
    Scroll { dx: f64, dy: f64 },
}

impl Event {
    pub fn pointer_move(x: i32, y: i32) -> Self {
        Event::PointerMove {
            pos: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn pointer_down(x: i32, y: i32) -> Self {
        Event::PointerDown {
            pos: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn pointer_up(x: i32, y: i32) -> Self {
        Event::PointerUp {
            pos: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    pub fn scroll(dy: f64) -> Self {
        Event::Scroll { dx: 0.0, dy }
    }

    /// Pointer position for pointer events.
    pub fn pos(&self) -> Option<Point> {
        match self {
            Event::PointerMove { pos, .. }
            | Event::PointerDown { pos, .. }
            | Event::PointerUp { pos, .. } => Some(*pos),
            _ => None,
        }
    }

    pub fn is_pointer_down(&self) -> bool {
        matches!(self, Event::PointerDown { .. })
    }

    pub fn is_pointer_move(&self) -> bool {
        matches!(self, Event::PointerMove { .. })
    }
}
