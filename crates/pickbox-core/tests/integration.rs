//! Integration tests for pickbox-core.
//!
//! These tests verify the public API works correctly end-to-end.

use pickbox_core::{
    Canvas, Color, Command, Constraints, DrawCommand, Point, Rect, RecordingCanvas, Size, State,
    Store, TextStyle,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

// =============================================================================
// Color Integration Tests
// =============================================================================

#[test]
fn test_accent_is_legible_under_white_text() {
    let accent = Color::rgba8(181, 66, 19, 1.0);
    assert!(accent.contrast_ratio(&Color::WHITE) >= 4.5);
}

#[test]
fn test_hover_tint_keeps_accent_channels() {
    let hover = Color::rgba8(181, 66, 19, 1.0).with_alpha(0.6);
    assert_eq!(hover.to_css(), "rgba(181, 66, 19, 0.6)");
    assert_eq!(hover.legible_text(), Color::WHITE);
}

// =============================================================================
// Layout Integration Tests
// =============================================================================

#[test]
fn test_constraints_cap_preferred_size() {
    let constraints = Constraints::loose(Size::new(200.0, 100.0));
    let size = constraints.constrain(Size::new(250.0, 40.0));
    assert_eq!(size, Size::new(200.0, 40.0));
}

#[test]
fn test_union_covers_field_and_menu() {
    let field = Rect::new(0.0, 0.0, 250.0, 40.0);
    let menu = Rect::new(0.0, 41.0, 250.0, 100.0);
    let region = field.union(&menu);
    assert!(region.contains_point(&Point::new(10.0, 40.5)));
    assert!(!region.contains_point(&Point::new(10.0, 142.0)));
}

// =============================================================================
// Canvas Integration Tests
// =============================================================================

#[test]
fn test_recorded_frame_serializes() {
    let mut canvas = RecordingCanvas::new();
    canvas.fill_rounded_rect(Rect::new(0.0, 0.0, 250.0, 40.0), 8.0, Color::WHITE);
    canvas.push_clip(Rect::new(10.0, 0.0, 200.0, 40.0));
    canvas.draw_text("HTML", Point::new(10.0, 13.0), &TextStyle::default());
    canvas.pop_clip();
    assert_eq!(canvas.clip_depth(), 0);

    let json = serde_json::to_string(canvas.commands()).unwrap();
    let parsed: Vec<DrawCommand> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, canvas.commands());
}

#[test]
fn test_stray_pop_clip_is_dropped() {
    let mut canvas = RecordingCanvas::new();
    canvas.pop_clip();
    assert!(canvas.is_empty());
}

// =============================================================================
// State Integration Tests
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Field {
    text: String,
}

enum FieldMessage {
    Type(char),
    Submit,
}

impl State for Field {
    type Message = FieldMessage;
    type Output = String;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Output> {
        match msg {
            FieldMessage::Type(c) => {
                self.text.push(c);
                Command::None
            }
            FieldMessage::Submit => Command::batch([Command::Emit(self.text.clone()), Command::Blur]),
        }
    }
}

#[test]
fn test_subscribers_see_post_update_snapshot() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();

    let mut store = Store::new(Field::default());
    store.subscribe(move |field: &Field| sink.lock().unwrap().push(field.text.clone()));

    store.dispatch(FieldMessage::Type('h'));
    store.dispatch(FieldMessage::Type('i'));
    let cmd = store.dispatch(FieldMessage::Submit);

    assert_eq!(*seen.lock().unwrap(), vec!["h", "hi", "hi"]);
    assert!(cmd.requests_blur());
    assert_eq!(cmd.into_emitted(), vec!["hi".to_string()]);
}
