//! Drawing surface abstraction.
//!
//! The simulation never touches pixels. It describes each frame through
//! [`Surface`], which the GPU backend tessellates and the [`DrawList`]
//! simply records.

use crate::geometry::{Rect, Rgb};
use glam::Vec2;
use std::convert::Infallible;

/// A 2D drawing target with pixel coordinates.
pub trait Surface {
    /// Error raised when a finished frame cannot be shown.
    type Error;

    /// Fill the whole target with one color.
    fn clear(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Fill the ellipse inscribed in `rect`.
    fn fill_ellipse(&mut self, rect: Rect, color: Rgb);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb, width: f32);

    /// Draw a single line of text centered on `center`.
    fn draw_text(&mut self, text: &str, center: Vec2, color: Rgb);

    /// Show the frame drawn since the last call.
    fn present(&mut self) -> Result<(), Self::Error>;

    /// Unfilled rectangle built from four lines.
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f32) {
        let min = rect.min;
        let max = rect.max();
        let top_right = Vec2::new(max.x, min.y);
        let bottom_left = Vec2::new(min.x, max.y);
        self.draw_line(min, top_right, color, width);
        self.draw_line(top_right, max, color, width);
        self.draw_line(max, bottom_left, color, width);
        self.draw_line(bottom_left, min, color, width);
    }
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    FillRect(Rect, Rgb),
    FillEllipse(Rect, Rgb),
    Line {
        from: Vec2,
        to: Vec2,
        color: Rgb,
        width: f32,
    },
    Text {
        text: String,
        center: Vec2,
        color: Rgb,
    },
}

/// Surface that records calls instead of drawing them.
#[derive(Debug, Default)]
pub struct DrawList {
    pending: Vec<DrawCommand>,
    presented: Vec<DrawCommand>,
    frames: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the frame currently being drawn.
    pub fn pending(&self) -> &[DrawCommand] {
        &self.pending
    }

    /// Commands of the most recently presented frame.
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.presented
    }

    /// Number of frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Surface for DrawList {
    type Error = Infallible;

    fn clear(&mut self, color: Rgb) {
        self.pending.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.pending.push(DrawCommand::FillRect(rect, color));
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Rgb) {
        self.pending.push(DrawCommand::FillEllipse(rect, color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Rgb, width: f32) {
        self.pending.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_text(&mut self, text: &str, center: Vec2, color: Rgb) {
        self.pending.push(DrawCommand::Text {
            text: text.to_string(),
            center,
            color,
        });
    }

    fn present(&mut self) -> Result<(), Infallible> {
        self.presented = std::mem::take(&mut self.pending);
        self.frames += 1;
        Ok(())
    }
}
