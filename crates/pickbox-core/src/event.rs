//! Input events for widgets.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types delivered to a widget, in host delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Mouse moved to position
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed
    MouseDown {
        /// Position of press
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released
    MouseUp {
        /// Position of release
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Mouse wheel scrolled
    Scroll {
        /// Horizontal scroll delta in pixels
        delta_x: f32,
        /// Vertical scroll delta in pixels
        delta_y: f32,
    },
    /// Key pressed
    KeyDown {
        /// Key pressed
        key: Key,
    },
    /// Key released
    KeyUp {
        /// Key released
        key: Key,
    },
    /// Printable text typed into the focused widget
    TextInput {
        /// Input text
        text: String,
    },
    /// Widget gained keyboard focus
    FocusIn,
    /// Widget lost keyboard focus
    FocusOut,
}

impl Event {
    /// Short name used in diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MouseMove { .. } => "mouse_move",
            Self::MouseDown { .. } => "mouse_down",
            Self::MouseUp { .. } => "mouse_up",
            Self::Scroll { .. } => "scroll",
            Self::KeyDown { .. } => "key_down",
            Self::KeyUp { .. } => "key_up",
            Self::TextInput { .. } => "text_input",
            Self::FocusIn => "focus_in",
            Self::FocusOut => "focus_out",
        }
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (wheel click)
    Middle,
    /// Any other button
    Other(u16),
}

impl From<i16> for MouseButton {
    fn from(button: i16) -> Self {
        match button {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            n => Self::Other(n.unsigned_abs()),
        }
    }
}

/// Keyboard keys a text field cares about.
///
/// Printable characters arrive as [`Event::TextInput`]; only editing and
/// navigation keys are named here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Escape
    Escape,
    /// Backspace
    Backspace,
    /// Delete
    Delete,
    /// Tab
    Tab,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Home
    Home,
    /// End
    End,
    /// Anything else
    Unidentified,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a key.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            "Escape" | "Esc" => Self::Escape,
            "Backspace" => Self::Backspace,
            "Delete" | "Del" => Self::Delete,
            "Tab" => Self::Tab,
            "ArrowUp" | "Up" => Self::Up,
            "ArrowDown" | "Down" => Self::Down,
            "ArrowLeft" | "Left" => Self::Left,
            "ArrowRight" | "Right" => Self::Right,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => Self::Unidentified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom_key() {
        assert_eq!(Key::from_dom_key("Enter"), Key::Enter);
        assert_eq!(Key::from_dom_key("Esc"), Key::Escape);
        assert_eq!(Key::from_dom_key("ArrowDown"), Key::Down);
        assert_eq!(Key::from_dom_key("Backspace"), Key::Backspace);
        assert_eq!(Key::from_dom_key("a"), Key::Unidentified);
    }

    #[test]
    fn test_mouse_button_from_dom() {
        assert_eq!(MouseButton::from(0), MouseButton::Left);
        assert_eq!(MouseButton::from(1), MouseButton::Middle);
        assert_eq!(MouseButton::from(2), MouseButton::Right);
        assert_eq!(MouseButton::from(4), MouseButton::Other(4));
    }

    #[test]
    fn test_event_name() {
        assert_eq!(Event::FocusIn.name(), "focus_in");
        assert_eq!(
            Event::TextInput {
                text: "a".to_string()
            }
            .name(),
            "text_input"
        );
    }

    #[test]
    fn test_event_json_roundtrip() {
        let e = Event::MouseDown {
            position: Point::new(4.0, 8.0),
            button: MouseButton::Left,
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
