//! Canvas2D renderer - renders DrawCommands to an HTML5 canvas.

use pickbox_core::draw::{BoxStyle, DrawCommand};
use pickbox_core::widget::TextStyle;
use pickbox_core::{Color, CornerRadius, Point, Rect};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::AppError;

/// Renderer that draws to an HTML5 Canvas 2D context.
pub struct Canvas2DRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2DRenderer {
    /// Create a new renderer for the given canvas element.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, AppError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| AppError::Context(format!("{e:?}")))?
            .ok_or_else(|| AppError::Context("no 2d context".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Context("not a CanvasRenderingContext2d".to_string()))?;

        Ok(Self { canvas, ctx })
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Clear the canvas.
    pub fn clear(&self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
    }

    /// Clear, then render a list of draw commands.
    pub fn render(&self, commands: &[DrawCommand]) {
        self.clear();
        let mut depth = 0usize;
        for cmd in commands {
            match cmd {
                DrawCommand::PushClip { .. } => depth += 1,
                DrawCommand::PopClip if depth == 0 => continue,
                DrawCommand::PopClip => depth -= 1,
                _ => {}
            }
            self.render_command(cmd);
        }
        // Unbalanced clips must not leak into the next frame.
        for _ in 0..depth {
            self.ctx.restore();
        }
    }

    fn render_command(&self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::Rect {
                bounds,
                radius,
                style,
            } => {
                self.draw_rect(bounds, radius, style);
            }
            DrawCommand::Text {
                content,
                position,
                style,
            } => {
                self.draw_text(content, position, style);
            }
            DrawCommand::Polygon { points, color } => {
                self.draw_polygon(points, color);
            }
            DrawCommand::PushClip { bounds } => {
                self.ctx.save();
                self.ctx.begin_path();
                self.ctx.rect(
                    f64::from(bounds.x),
                    f64::from(bounds.y),
                    f64::from(bounds.width),
                    f64::from(bounds.height),
                );
                self.ctx.clip();
            }
            DrawCommand::PopClip => self.ctx.restore(),
        }
    }

    fn draw_rect(&self, bounds: &Rect, radius: &CornerRadius, style: &BoxStyle) {
        self.ctx.begin_path();
        if radius.is_zero() {
            self.ctx.rect(
                f64::from(bounds.x),
                f64::from(bounds.y),
                f64::from(bounds.width),
                f64::from(bounds.height),
            );
        } else {
            self.rounded_rect(bounds, radius);
        }

        if let Some(fill) = style.fill {
            self.ctx.set_fill_style_str(&fill.to_css());
            self.ctx.fill();
        }

        if let Some(stroke) = &style.stroke {
            self.ctx.set_stroke_style_str(&stroke.color.to_css());
            self.ctx.set_line_width(f64::from(stroke.width));
            self.ctx.stroke();
        }
    }

    fn rounded_rect(&self, bounds: &Rect, radius: &CornerRadius) {
        let x = f64::from(bounds.x);
        let y = f64::from(bounds.y);
        let w = f64::from(bounds.width);
        let h = f64::from(bounds.height);
        // Radii larger than half the box collapse arcTo into a mess.
        let cap = w.min(h) / 2.0;
        let tl = f64::from(radius.top_left).min(cap);
        let tr = f64::from(radius.top_right).min(cap);
        let br = f64::from(radius.bottom_right).min(cap);
        let bl = f64::from(radius.bottom_left).min(cap);

        self.ctx.move_to(x + tl, y);
        self.ctx.line_to(x + w - tr, y);
        self.ctx.arc_to(x + w, y, x + w, y + tr, tr).ok();
        self.ctx.line_to(x + w, y + h - br);
        self.ctx.arc_to(x + w, y + h, x + w - br, y + h, br).ok();
        self.ctx.line_to(x + bl, y + h);
        self.ctx.arc_to(x, y + h, x, y + h - bl, bl).ok();
        self.ctx.line_to(x, y + tl);
        self.ctx.arc_to(x, y, x + tl, y, tl).ok();
        self.ctx.close_path();
    }

    fn draw_text(&self, content: &str, position: &Point, style: &TextStyle) {
        let font = format!("{}px sans-serif", style.size);
        self.ctx.set_font(&font);
        self.ctx.set_fill_style_str(&style.color.to_css());
        self.ctx
            .fill_text(
                content,
                f64::from(position.x),
                f64::from(position.y + style.size),
            )
            .ok();
    }

    fn draw_polygon(&self, points: &[Point], color: &Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(first.x), f64::from(first.y));
        for p in rest {
            self.ctx.line_to(f64::from(p.x), f64::from(p.y));
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }
}
