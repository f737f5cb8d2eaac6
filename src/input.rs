//! Pointer input for the simulation.
//!
//! Raw window events are turned into a small set of [`InputEvent`]s and
//! queued until the next frame drains them:
//!
//! ```ignore
//! // In the window event callback:
//! queue.handle_event(&event);
//!
//! // Once per frame:
//! for event in queue.drain() {
//!     controller.handle(&event, &mut state, &mut rng);
//! }
//! ```

use glam::Vec2;
use std::collections::VecDeque;
use std::time::Instant;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn bit(self) -> u8 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Right => 1 << 1,
            MouseButton::Middle => 1 << 2,
        }
    }
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left, // Default for other buttons
        }
    }
}

/// Set of mouse buttons held down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);

    pub fn of(button: MouseButton) -> Self {
        ButtonMask(button.bit())
    }

    #[inline]
    pub fn contains(self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    pub fn remove(&mut self, button: MouseButton) {
        self.0 &= !button.bit();
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// One pointer or window event, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A mouse button went down at `position`.
    PointerDown {
        position: Vec2,
        button: MouseButton,
        /// Seconds since the input source started.
        time: f64,
    },
    /// The cursor moved by `delta` to `position`.
    PointerMove {
        position: Vec2,
        delta: Vec2,
        buttons: ButtonMask,
    },
    /// The window was asked to close.
    Close,
}

/// Something that hands over the events gathered since the last frame.
pub trait InputSource {
    fn drain(&mut self) -> Vec<InputEvent>;
}

/// Prerecorded input: each drain yields the next frame's batch.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<InputEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames not yet drained.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn drain(&mut self) -> Vec<InputEvent> {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Translates winit window events into [`InputEvent`]s.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
    cursor: Option<Vec2>,
    held: ButtonMask,
    start: Instant,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    /// Create an empty queue. Event timestamps count from now.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            cursor: None,
            held: ButtonMask::NONE,
            start: Instant::now(),
        }
    }

    /// Last known cursor position in window pixels.
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Buttons currently held down.
    pub fn held(&self) -> ButtonMask {
        self.held
    }

    /// Queue an already translated event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.push(InputEvent::Close),

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = MouseButton::from(*button);
                match state {
                    ElementState::Pressed => {
                        self.held.insert(btn);
                        // A press before any cursor motion has no position to report.
                        if let Some(position) = self.cursor {
                            let time = self.start.elapsed().as_secs_f64();
                            self.push(InputEvent::PointerDown {
                                position,
                                button: btn,
                                time,
                            });
                        }
                    }
                    ElementState::Released => self.held.remove(btn),
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = Vec2::new(position.x as f32, position.y as f32);
                let delta = self.cursor.map_or(Vec2::ZERO, |last| new_pos - last);
                self.cursor = Some(new_pos);
                self.push(InputEvent::PointerMove {
                    position: new_pos,
                    delta,
                    buttons: self.held,
                });
            }

            WindowEvent::Focused(false) => self.held = ButtonMask::NONE,

            _ => {}
        }
    }
}

impl InputSource for InputQueue {
    fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mask() {
        let mut mask = ButtonMask::NONE;
        assert!(mask.is_empty());

        mask.insert(MouseButton::Left);
        mask.insert(MouseButton::Middle);
        assert!(mask.contains(MouseButton::Left));
        assert!(!mask.contains(MouseButton::Right));

        mask.remove(MouseButton::Left);
        assert!(!mask.contains(MouseButton::Left));
        assert_eq!(mask, ButtonMask::of(MouseButton::Middle));
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::Close);
        assert_eq!(queue.drain(), vec![InputEvent::Close]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_close_requested_becomes_close() {
        let mut queue = InputQueue::new();
        queue.handle_event(&WindowEvent::CloseRequested);
        assert_eq!(queue.drain(), vec![InputEvent::Close]);
    }

    #[test]
    fn test_scripted_source_yields_frames_in_order() {
        let mut script = ScriptedInput::new(vec![vec![], vec![InputEvent::Close]]);
        assert!(script.drain().is_empty());
        assert_eq!(script.drain(), vec![InputEvent::Close]);
        assert_eq!(script.remaining(), 0);
        assert!(script.drain().is_empty());
    }
}
