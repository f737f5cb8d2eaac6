//! On-screen buttons.
//!
//! A [`Button`] is a colored rectangle with a centered label, bound to
//! one [`Command`]. The button itself only knows how to hit-test and
//! draw; executing the command is up to
//! [`InteractionController`](crate::interaction::InteractionController).

use crate::geometry::{Rect, Rgb};
use crate::surface::Surface;
use glam::Vec2;

/// Label color of every button.
pub const LABEL_COLOR: Rgb = Rgb::BLACK;

/// Label of the pause button while running.
pub const PAUSE_LABEL: &str = "Pause";
/// Label of the pause button while paused.
pub const RESUME_LABEL: &str = "Resume";

/// Actions a button can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Create a cloud at a random spot.
    AddCloud,
    /// Advance the active cloud's shape.
    CycleShape,
    /// Raise the active cloud's intensity by 0.1.
    IncreaseIntensity,
    /// Lower the active cloud's intensity by 0.1.
    DecreaseIntensity,
    /// Multiply the active cloud's velocity factor by 1.2.
    SpeedUp,
    /// Divide the active cloud's velocity factor by 1.2.
    SlowDown,
    /// Pause or resume the simulation.
    TogglePause,
    /// Remove the active cloud.
    DeleteActiveCloud,
}

impl Command {
    /// Whether the command does nothing without an active cloud.
    pub fn needs_active_emitter(self) -> bool {
        !matches!(self, Command::AddCloud | Command::TogglePause)
    }
}

/// A clickable labeled rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    rect: Rect,
    pub label: String,
    pub color: Rgb,
    command: Command,
}

impl Button {
    pub fn new(rect: Rect, label: impl Into<String>, color: Rgb, command: Command) -> Self {
        Self {
            rect,
            label: label.into(),
            color,
            command,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn command(&self) -> Command {
        self.command
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rect(self.rect, self.color);
        surface.draw_text(&self.label, self.rect.center(), LABEL_COLOR);
    }
}

/// The standard eight buttons in two rows along the top of the window.
pub fn default_layout() -> Vec<Button> {
    const W: f32 = 150.0;
    const H: f32 = 40.0;
    vec![
        Button::new(
            Rect::new(10.0, 10.0, W, H),
            "Add Cloud",
            Rgb::new(0, 255, 0),
            Command::AddCloud,
        ),
        Button::new(
            Rect::new(170.0, 10.0, W, H),
            "Change Shape",
            Rgb::new(255, 255, 0),
            Command::CycleShape,
        ),
        Button::new(
            Rect::new(330.0, 10.0, W, H),
            "More Rain",
            Rgb::new(0, 255, 255),
            Command::IncreaseIntensity,
        ),
        Button::new(
            Rect::new(490.0, 10.0, W, H),
            "Less Rain",
            Rgb::new(255, 0, 255),
            Command::DecreaseIntensity,
        ),
        Button::new(
            Rect::new(650.0, 10.0, W, H),
            "Speed Up",
            Rgb::new(255, 128, 0),
            Command::SpeedUp,
        ),
        Button::new(
            Rect::new(10.0, 60.0, W, H),
            "Slow Down",
            Rgb::new(128, 255, 0),
            Command::SlowDown,
        ),
        Button::new(
            Rect::new(170.0, 60.0, W, H),
            PAUSE_LABEL,
            Rgb::new(255, 165, 0),
            Command::TogglePause,
        ),
        Button::new(
            Rect::new(330.0, 60.0, W, H),
            "Delete Cloud",
            Rgb::new(255, 0, 0),
            Command::DeleteActiveCloud,
        ),
    ]
}
