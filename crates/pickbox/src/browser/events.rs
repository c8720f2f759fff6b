//! Browser event handling - converts DOM events to pickbox Events.

use pickbox_core::{Event, Key, MouseButton, Point};
use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent};

/// Map a DOM `button` index to a [`MouseButton`].
pub fn mouse_button(button: i16) -> MouseButton {
    match button {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        other => MouseButton::Other(other.unsigned_abs()),
    }
}

/// Position of a mouse event in canvas-local pixels.
pub fn canvas_position(event: &MouseEvent, canvas: &HtmlCanvasElement) -> Point {
    let rect = canvas.get_bounding_client_rect();
    Point::new(
        (f64::from(event.client_x()) - rect.left()) as f32,
        (f64::from(event.client_y()) - rect.top()) as f32,
    )
}

/// Convert a canvas mouse event to a pickbox Event.
pub fn mouse_event_to_pickbox(event: &MouseEvent, canvas: &HtmlCanvasElement) -> Option<Event> {
    let position = canvas_position(event, canvas);
    let button = mouse_button(event.button());
    match event.type_().as_str() {
        "mousedown" => Some(Event::MouseDown { position, button }),
        "mouseup" => Some(Event::MouseUp { position, button }),
        "mousemove" => Some(Event::MouseMove { position }),
        _ => None,
    }
}

/// Convert a wheel event to a scroll in pixels.
pub fn wheel_event_to_pickbox(event: &WheelEvent) -> Event {
    // Line mode (Firefox) reports rows rather than pixels.
    let scale = if event.delta_mode() == WheelEvent::DOM_DELTA_LINE {
        16.0
    } else {
        1.0
    };
    Event::Scroll {
        delta_x: (event.delta_x() * scale) as f32,
        delta_y: (event.delta_y() * scale) as f32,
    }
}

/// Convert a keydown to either typed text or a named key.
///
/// Tab moves focus away, so it becomes [`Event::FocusOut`].
pub fn keyboard_event_to_pickbox(event: &KeyboardEvent) -> Option<Event> {
    if event.ctrl_key() || event.meta_key() || event.alt_key() {
        return None;
    }
    let key = event.key();
    if key.chars().count() == 1 {
        return Some(Event::TextInput { text: key });
    }
    match Key::from_dom_key(&key) {
        Key::Tab => Some(Event::FocusOut),
        Key::Unidentified => None,
        key => Some(Event::KeyDown { key }),
    }
}
