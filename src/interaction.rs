//! Mapping pointer input onto clouds and buttons.
//!
//! | Event | Target | Effect |
//! |-------|--------|--------|
//! | Left down | button | run the button's [`Command`] |
//! | Left down | elsewhere | double-click delete, then select the cloud under the pointer |
//! | Move with left held | - | drag the active cloud by the motion delta |
//!
//! A double click is two left presses less than
//! [`DOUBLE_CLICK_INTERVAL`] seconds apart at exactly the same pixel.

use crate::emitter::Emitter;
use crate::input::{ButtonMask, InputEvent, MouseButton};
use crate::state::{Click, SimulationState};
use crate::ui::{self, Button, Command};
use glam::Vec2;
use log::debug;
use rand::Rng;

/// Longest gap between two presses that still counts as a double click.
pub const DOUBLE_CLICK_INTERVAL: f64 = 0.5;

/// Size of every cloud created by [`Command::AddCloud`].
pub const CLOUD_SIZE: Vec2 = Vec2::new(100.0, 50.0);

/// Intensity step of the More/Less Rain buttons.
pub const INTENSITY_STEP: f32 = 0.1;

/// Velocity factor multiplier of the Speed Up/Slow Down buttons.
pub const SPEED_STEP: f32 = 1.2;

/// Applies input events and button commands to a [`SimulationState`].
#[derive(Debug, Clone)]
pub struct InteractionController {
    controls: Vec<Button>,
    viewport: Vec2,
    double_click_interval: f64,
}

impl InteractionController {
    /// Controller with the standard button layout for a viewport of the
    /// given size in pixels.
    pub fn new(viewport: Vec2) -> Self {
        Self::with_controls(viewport, ui::default_layout())
    }

    pub fn with_controls(viewport: Vec2, controls: Vec<Button>) -> Self {
        Self {
            controls,
            viewport,
            double_click_interval: DOUBLE_CLICK_INTERVAL,
        }
    }

    pub fn controls(&self) -> &[Button] {
        &self.controls
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Dispatch one input event. `Close` is left to the caller.
    pub fn handle<R: Rng + ?Sized>(
        &mut self,
        event: &InputEvent,
        state: &mut SimulationState,
        rng: &mut R,
    ) {
        match *event {
            InputEvent::PointerDown {
                position,
                button,
                time,
            } => self.pointer_down(position, button, time, state, rng),
            InputEvent::PointerMove { delta, buttons, .. } => {
                self.pointer_move(delta, buttons, state)
            }
            InputEvent::Close => {}
        }
    }

    fn pointer_down<R: Rng + ?Sized>(
        &mut self,
        position: Vec2,
        button: MouseButton,
        time: f64,
        state: &mut SimulationState,
        rng: &mut R,
    ) {
        if button != MouseButton::Left {
            return;
        }

        let hit = self
            .controls
            .iter()
            .find(|control| control.contains_point(position))
            .map(Button::command);

        if hit.is_none() && self.is_double_click(state.last_click, position, time) {
            if let Some(id) = state.emitter_at(position) {
                state.remove_emitter(id);
                debug!("Double click removed cloud {:?}", id);
            }
        }

        state.last_click = Some(Click { position, time });

        match hit {
            Some(command) => self.execute(command, state, rng),
            None => {
                let selected = state.emitter_at(position);
                state.set_active(selected);
            }
        }
    }

    fn is_double_click(&self, last: Option<Click>, position: Vec2, time: f64) -> bool {
        last.is_some_and(|last| {
            time - last.time < self.double_click_interval && last.position == position
        })
    }

    fn pointer_move(&mut self, delta: Vec2, buttons: ButtonMask, state: &mut SimulationState) {
        if !buttons.contains(MouseButton::Left) {
            return;
        }
        if let Some(cloud) = state.active_mut() {
            cloud.translate(delta);
        }
    }

    /// Run a button command. Commands that need a selection do nothing
    /// when no cloud is active.
    pub fn execute<R: Rng + ?Sized>(
        &mut self,
        command: Command,
        state: &mut SimulationState,
        rng: &mut R,
    ) {
        if command.needs_active_emitter() && state.active().is_none() {
            debug!("{:?} ignored: no active cloud", command);
            return;
        }
        debug!("Executing {:?}", command);

        match command {
            Command::AddCloud => {
                let position = self.random_cloud_position(rng);
                let id = state.add_emitter(|id| Emitter::new(id, position, CLOUD_SIZE));
                debug!("Added cloud {:?} at {:?}", id, position);
            }
            Command::TogglePause => {
                state.paused = !state.paused;
                let label = if state.paused {
                    ui::RESUME_LABEL
                } else {
                    ui::PAUSE_LABEL
                };
                for control in self
                    .controls
                    .iter_mut()
                    .filter(|c| c.command() == Command::TogglePause)
                {
                    control.label = label.to_string();
                }
            }
            Command::DeleteActiveCloud => {
                state.remove_active();
            }
            Command::CycleShape
            | Command::IncreaseIntensity
            | Command::DecreaseIntensity
            | Command::SpeedUp
            | Command::SlowDown => {
                let Some(cloud) = state.active_mut() else {
                    return;
                };
                match command {
                    Command::CycleShape => {
                        cloud.cycle_shape();
                    }
                    Command::IncreaseIntensity => cloud.adjust_intensity(INTENSITY_STEP),
                    Command::DecreaseIntensity => cloud.adjust_intensity(-INTENSITY_STEP),
                    Command::SpeedUp => cloud.adjust_velocity_factor(SPEED_STEP),
                    _ => cloud.adjust_velocity_factor(1.0 / SPEED_STEP),
                }
            }
        }
    }

    /// Whole-pixel position with the cloud inside the window horizontally
    /// and its top edge between y = 100 and the middle of the window.
    fn random_cloud_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let max_x = (self.viewport.x - CLOUD_SIZE.x).max(0.0) as i32;
        let max_y = ((self.viewport.y / 2.0) as i32).max(100);
        Vec2::new(
            rng.gen_range(0..=max_x) as f32,
            rng.gen_range(100..=max_y) as f32,
        )
    }
}
