//! Draw commands produced by painting a widget.
//!
//! All rendering reduces to these primitives, which serialize to JSON for the
//! browser renderer.

use crate::widget::TextStyle;
use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Box style for rectangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Create a box with only stroke.
    #[must_use]
    pub const fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }
}

/// A single rendering primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Top-left position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Fill a polygon
    Polygon {
        /// Polygon vertices
        points: Vec<Point>,
        /// Fill color
        color: Color,
    },

    /// Restrict subsequent commands to `bounds` until the matching `PopClip`
    PushClip {
        /// Clip bounds
        bounds: Rect,
    },

    /// End the innermost clip region
    PopClip,
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a filled rounded rectangle.
    #[must_use]
    pub const fn rounded_rect(bounds: Rect, radius: f32, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            style: BoxStyle::fill(color),
        }
    }

    /// Create a stroked rectangle.
    #[must_use]
    pub const fn stroked_rect(bounds: Rect, radius: f32, stroke: StrokeStyle) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::uniform(radius),
            style: BoxStyle::stroke(stroke),
        }
    }

    /// Text content if this is a text command.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_rect() {
        let cmd = DrawCommand::filled_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        match cmd {
            DrawCommand::Rect { radius, style, .. } => {
                assert!(radius.is_zero());
                assert_eq!(style.fill, Some(Color::WHITE));
                assert!(style.stroke.is_none());
            }
            _ => panic!("Expected Rect"),
        }
    }

    #[test]
    fn test_stroked_rect_has_no_fill() {
        let cmd = DrawCommand::stroked_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            8.0,
            StrokeStyle {
                color: Color::BLACK,
                width: 2.0,
            },
        );
        if let DrawCommand::Rect { radius, style, .. } = cmd {
            assert_eq!(radius, CornerRadius::uniform(8.0));
            assert!(style.fill.is_none());
            assert_eq!(style.stroke.map(|s| s.width), Some(2.0));
        } else {
            panic!("Expected Rect");
        }
    }

    #[test]
    fn test_text_accessor() {
        let cmd = DrawCommand::Text {
            content: "Banana".to_string(),
            position: Point::ORIGIN,
            style: TextStyle::default(),
        };
        assert_eq!(cmd.text(), Some("Banana"));
        assert_eq!(DrawCommand::PopClip.text(), None);
    }

    #[test]
    fn test_command_json_roundtrip() {
        let cmd = DrawCommand::PushClip {
            bounds: Rect::new(1.0, 2.0, 3.0, 4.0),
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
