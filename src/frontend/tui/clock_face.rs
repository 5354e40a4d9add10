//! Analog clock face drawn on a braille canvas.
//!
//! The canvas spans `FACE_EXTENT` face units on each side of the center, the
//! same mapping `FaceGeometry` uses for pointer hit-testing, so what the user
//! grabs is exactly what was drawn.

use super::ClockPalette;
use crate::core::clock::ClockTime;
use crate::core::drag::{HandLengths, HandTarget, FACE_EXTENT, FACE_RADIUS};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{
        canvas::{Canvas, Circle, Context, Line as CanvasLine},
        Widget,
    },
};

/// Distance of the hour numbers from the center
const NUMBER_RADIUS: f64 = 80.0;

/// Point at `length` units along a bearing, in canvas coordinates (y up)
fn polar(bearing_deg: f64, length: f64) -> (f64, f64) {
    let rad = bearing_deg.to_radians();
    (length * rad.sin(), length * rad.cos())
}

pub struct ClockFace<'a> {
    time: ClockTime,
    lengths: HandLengths,
    dragging: Option<HandTarget>,
    palette: &'a ClockPalette,
}

impl<'a> ClockFace<'a> {
    pub fn new(time: ClockTime, lengths: HandLengths, palette: &'a ClockPalette) -> Self {
        Self {
            time,
            lengths,
            dragging: None,
            palette,
        }
    }

    /// Highlight the hand being dragged
    pub fn dragging(mut self, target: Option<HandTarget>) -> Self {
        self.dragging = target;
        self
    }

    fn hand_color(&self, target: HandTarget) -> ratatui::style::Color {
        if self.dragging == Some(target) {
            return self.palette.accent;
        }
        match target {
            HandTarget::Hour => self.palette.hour_hand,
            HandTarget::Minute => self.palette.minute_hand,
        }
    }

    fn draw_hand(&self, ctx: &mut Context, target: HandTarget) {
        let (angle, length) = match target {
            HandTarget::Hour => (self.time.hour_angle(), self.lengths.hour),
            HandTarget::Minute => (self.time.minute_angle(), self.lengths.minute),
        };
        let color = self.hand_color(target);
        let (x, y) = polar(angle, length);
        ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, color));

        // Hour hand gets a second stroke so it reads thicker
        if target == HandTarget::Hour {
            let (nx, ny) = polar(angle + 90.0, 1.5);
            ctx.draw(&CanvasLine::new(nx, ny, x + nx, y + ny, color));
        }

        let grip = if target == HandTarget::Hour { "◆" } else { "●" };
        ctx.print(x, y, Span::styled(grip, Style::default().fg(color)));
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let palette = self.palette;
        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-FACE_EXTENT, FACE_EXTENT])
            .y_bounds([-FACE_EXTENT, FACE_EXTENT])
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: FACE_RADIUS,
                    color: palette.face,
                });

                // Minute ticks just inside the rim
                for minute in (0..60).step_by(5) {
                    let (x1, y1) = polar(minute as f64 * 6.0, FACE_RADIUS - 6.0);
                    let (x2, y2) = polar(minute as f64 * 6.0, FACE_RADIUS - 1.0);
                    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, palette.face));
                }

                for hour in 1..=12 {
                    let (x, y) = polar(hour as f64 * 30.0, NUMBER_RADIUS);
                    let style = Style::default()
                        .fg(palette.numbers)
                        .add_modifier(Modifier::BOLD);
                    ctx.print(x, y, Span::styled(hour.to_string(), style));
                }

                ctx.layer();
                self.draw_hand(ctx, HandTarget::Hour);
                self.draw_hand(ctx, HandTarget::Minute);
                ctx.print(0.0, 0.0, Span::styled("○", Style::default().fg(palette.accent)));
            });

        canvas.render(area, buf);
    }
}
