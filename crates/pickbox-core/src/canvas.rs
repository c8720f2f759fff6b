//! Canvas implementations for rendering.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle};
use crate::widget::{Canvas, TextStyle};
use crate::{Color, CornerRadius, Point, Rect};

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Used by tests to inspect what a widget painted, and by the browser runtime
/// to hand a frame to the Canvas2D renderer.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    clip_depth: usize,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, clearing the canvas.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.clip_depth = 0;
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Current clip nesting depth.
    #[must_use]
    pub const fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// All text drawn so far, in paint order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands.iter().filter_map(DrawCommand::text).collect()
    }

    fn push_rect(&mut self, bounds: Rect, radius: f32, style: BoxStyle) {
        self.commands.push(DrawCommand::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            style,
        });
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push_rect(rect, 0.0, BoxStyle::fill(color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.push_rect(rect, 0.0, BoxStyle::stroke(StrokeStyle { color, width }));
    }

    fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.push_rect(rect, radius, BoxStyle::fill(color));
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, width: f32) {
        self.push_rect(rect, radius, BoxStyle::stroke(StrokeStyle { color, width }));
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.clip_depth += 1;
        self.commands.push(DrawCommand::PushClip { bounds: rect });
    }

    fn pop_clip(&mut self) {
        if self.clip_depth == 0 {
            tracing::warn!("pop_clip without matching push_clip");
            return;
        }
        self.clip_depth -= 1;
        self.commands.push(DrawCommand::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // RecordingCanvas Tests
    // =========================================================================

    #[test]
    fn test_new_canvas_is_empty() {
        let canvas = RecordingCanvas::new();
        assert!(canvas.is_empty());
        assert_eq!(canvas.command_count(), 0);
    }

    #[test]
    fn test_records_rects_and_text() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rounded_rect(Rect::new(0.0, 0.0, 50.0, 20.0), 8.0, Color::WHITE);
        canvas.draw_text("Apple", Point::new(4.0, 4.0), &TextStyle::default());
        assert_eq!(canvas.command_count(), 2);
        assert_eq!(canvas.texts(), vec!["Apple"]);
    }

    #[test]
    fn test_clip_balancing() {
        let mut canvas = RecordingCanvas::new();
        canvas.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(canvas.clip_depth(), 1);
        canvas.pop_clip();
        assert_eq!(canvas.clip_depth(), 0);

        // Unbalanced pop is ignored
        canvas.pop_clip();
        assert_eq!(canvas.command_count(), 2);
    }

    #[test]
    fn test_take_commands_clears() {
        let mut canvas = RecordingCanvas::new();
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        let taken = canvas.take_commands();
        assert_eq!(taken.len(), 1);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_polygon_recorded() {
        let mut canvas = RecordingCanvas::new();
        let pts = [Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 3.0)];
        canvas.fill_polygon(&pts, Color::BLACK);
        assert!(matches!(
            &canvas.commands()[0],
            DrawCommand::Polygon { points, .. } if points.len() == 3
        ));
    }
}
