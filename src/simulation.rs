//! Simulation builder and the phase-ordered frame loop.
//!
//! Every frame runs the same three phases in order:
//!
//! 1. drain input into the [`InteractionController`],
//! 2. tick every cloud (skipped while paused),
//! 3. draw the background, clouds, buttons and selection, then present.
//!
//! [`SimulationLoop`] holds the state and exposes each phase on its own;
//! [`Simulation`] opens a window and drives the loop until it is closed.

use crate::config::AppConfig;
use crate::error::SimulationError;
use crate::geometry::Rgb;
use crate::input::{InputEvent, InputSource};
use crate::interaction::InteractionController;
use crate::rain_field::RainField;
use crate::settings::Settings;
use crate::state::SimulationState;
use crate::surface::Surface;
use crate::time::Clock;
use crate::window::{App, WindowOptions};
use glam::Vec2;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use winit::event_loop::EventLoop;

/// Outline color of the active cloud.
pub const SELECTION_COLOR: Rgb = Rgb::RED;

/// Outline width of the active cloud.
pub const SELECTION_WIDTH: f32 = 2.0;

/// Whether the loop should keep going after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Simulation state plus everything needed to advance and draw it.
#[derive(Debug)]
pub struct SimulationLoop {
    state: SimulationState,
    controller: InteractionController,
    settings: Settings,
    viewport: Vec2,
    rain_field: Option<RainField>,
    rng: SmallRng,
}

impl SimulationLoop {
    /// Create a loop for a viewport of `viewport` pixels.
    ///
    /// Fails if any `min_*` setting exceeds its `max_*`.
    pub fn new(settings: Settings, viewport: Vec2) -> Result<Self, crate::error::ConfigError> {
        let settings = settings.validated()?;
        Ok(Self {
            state: SimulationState::new(),
            controller: InteractionController::new(viewport),
            settings,
            viewport,
            rain_field: None,
            rng: SmallRng::from_entropy(),
        })
    }

    /// Replace the random source with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Add or remove looping background rain.
    pub fn with_rain_field(mut self, enabled: bool) -> Self {
        self.rain_field =
            enabled.then(|| RainField::new(&self.settings, self.viewport, &mut self.rng));
        self
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn rain_field(&self) -> Option<&RainField> {
        self.rain_field.as_ref()
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Phase 1: apply input events in order. Stops at the first `Close`.
    pub fn process_input<I>(&mut self, events: I) -> Flow
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if event == InputEvent::Close {
                return Flow::Exit;
            }
            self.controller.handle(&event, &mut self.state, &mut self.rng);
        }
        Flow::Continue
    }

    /// Phase 2: advance every cloud and the rain field by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        if self.state.paused {
            return;
        }

        if let Some(field) = &mut self.rain_field {
            field.tick(dt, &self.settings, &mut self.rng);
        }

        let height = self.viewport.y;
        for cloud in self.state.emitters_mut() {
            cloud.tick(dt, &self.settings, height, &mut self.rng);
        }
    }

    /// Phase 3: draw the whole scene. Does not present.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear(self.settings.background_color);

        if let Some(field) = &self.rain_field {
            field.render(surface, &self.settings);
        }

        for cloud in self.state.emitters() {
            cloud.render(surface, self.settings.drop_color);
        }

        for control in self.controller.controls() {
            control.render(surface);
        }

        if let Some(active) = self.state.active() {
            surface.stroke_rect(active.bounds(), SELECTION_COLOR, SELECTION_WIDTH);
        }
    }

    /// Run one complete frame: input, update, render, present.
    ///
    /// A `Close` event ends the frame before anything is updated or drawn.
    pub fn frame<S, I>(&mut self, dt: f32, events: I, surface: &mut S) -> Result<Flow, S::Error>
    where
        S: Surface + ?Sized,
        I: IntoIterator<Item = InputEvent>,
    {
        if self.process_input(events) == Flow::Exit {
            return Ok(Flow::Exit);
        }
        self.update(dt);
        self.render(surface);
        surface.present()?;
        Ok(Flow::Continue)
    }

    /// Drive frames until the input source reports `Close`.
    pub fn run<In, S, C>(
        &mut self,
        input: &mut In,
        surface: &mut S,
        clock: &mut C,
    ) -> Result<(), S::Error>
    where
        In: InputSource + ?Sized,
        S: Surface + ?Sized,
        C: Clock + ?Sized,
    {
        loop {
            let dt = clock.elapsed_since_last_frame();
            let events = input.drain();
            if self.frame(dt, events, surface)? == Flow::Exit {
                info!("Close requested, stopping simulation");
                return Ok(());
            }
            clock.sleep_until_next_frame();
        }
    }
}

/// A windowed rain simulation builder.
///
/// ```ignore
/// Simulation::new(Settings::default())
///     .with_viewport(800, 600)
///     .with_rain_field(true)
///     .run()?;
/// ```
pub struct Simulation {
    settings: Settings,
    options: WindowOptions,
    seed: Option<u64>,
    rain_field: bool,
}

impl Simulation {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            options: WindowOptions::default(),
            seed: None,
            rain_field: false,
        }
    }

    /// Build from a loaded config file.
    pub fn from_config(config: AppConfig) -> Self {
        Self::new(config.settings)
            .with_title(config.window.title)
            .with_viewport(config.window.width, config.window.height)
            .with_target_fps(config.window.target_fps)
            .with_rain_field(config.rain_field)
    }

    /// Set the window size in pixels. Also the simulation viewport.
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.options.width = width;
        self.options.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.options.title = title.into();
        self
    }

    /// Set the frame rate cap.
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.options.target_fps = fps;
        self
    }

    /// Use a fixed random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rain_field(mut self, enabled: bool) -> Self {
        self.rain_field = enabled;
        self
    }

    /// Run the simulation. This blocks until the window is closed.
    pub fn run(self) -> Result<(), SimulationError> {
        let viewport = Vec2::new(self.options.width as f32, self.options.height as f32);
        let mut sim = SimulationLoop::new(self.settings, viewport)?;
        if let Some(seed) = self.seed {
            sim = sim.with_seed(seed);
        }
        let sim = sim.with_rain_field(self.rain_field);

        info!(
            "Starting simulation: {}x{} at {} Hz",
            self.options.width, self.options.height, self.options.target_fps
        );

        let event_loop = EventLoop::new()?;
        let mut app = App::new(sim, self.options);
        event_loop.run_app(&mut app)?;
        app.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ButtonMask, MouseButton, ScriptedInput};
    use crate::surface::{DrawCommand, DrawList};
    use crate::time::FixedClock;
    use crate::ui::Command;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn sim() -> SimulationLoop {
        SimulationLoop::new(Settings::default(), VIEWPORT)
            .unwrap()
            .with_seed(99)
    }

    fn press(x: f32, y: f32, time: f64) -> InputEvent {
        InputEvent::PointerDown {
            position: Vec2::new(x, y),
            button: MouseButton::Left,
            time,
        }
    }

    #[test]
    fn test_rejects_inverted_settings() {
        let settings = Settings {
            min_length: 30.0,
            max_length: 10.0,
            ..Default::default()
        };
        assert!(SimulationLoop::new(settings, VIEWPORT).is_err());
    }

    #[test]
    fn test_starts_running_with_no_clouds() {
        let sim = sim();
        assert!(!sim.is_paused());
        assert!(sim.state().emitters().is_empty());
        assert!(sim.rain_field().is_none());
    }

    #[test]
    fn test_pause_gates_update_only() {
        let mut sim = sim();
        let id = sim.state_mut().add_emitter(|id| {
            crate::emitter::Emitter::new(id, Vec2::new(100.0, 100.0), Vec2::new(100.0, 50.0))
                .with_intensity(1.0)
        });
        sim.state_mut().paused = true;

        let mut list = DrawList::new();
        for _ in 0..10 {
            sim.frame(1.0 / 60.0, Vec::new(), &mut list).unwrap();
        }
        assert_eq!(sim.state().emitter(id).unwrap().particles().len(), 0);
        assert_eq!(list.frames_presented(), 10);

        sim.state_mut().paused = false;
        sim.frame(1.0 / 60.0, Vec::new(), &mut list).unwrap();
        assert_eq!(sim.state().emitter(id).unwrap().particles().len(), 1);
    }

    #[test]
    fn test_render_order() {
        let mut sim = sim();
        let id = sim.state_mut().spawn_emitter(Vec2::new(100.0, 200.0), Vec2::new(100.0, 50.0));
        sim.state_mut().set_active(Some(id));

        let mut list = DrawList::new();
        sim.render(&mut list);
        let cmds = list.pending();

        assert_eq!(cmds[0], DrawCommand::Clear(sim.settings().background_color));
        assert!(matches!(
            cmds[1],
            DrawCommand::FillRect(rect, _) if rect.min == Vec2::new(100.0, 200.0)
        ));

        // Buttons follow the cloud, the selection outline comes last.
        let texts = cmds
            .iter()
            .filter(|c| matches!(c, DrawCommand::Text { .. }))
            .count();
        assert_eq!(texts, 8);
        let tail = &cmds[cmds.len() - 4..];
        assert!(tail.iter().all(|c| matches!(
            c,
            DrawCommand::Line { color: SELECTION_COLOR, .. }
        )));
    }

    #[test]
    fn test_no_outline_without_selection() {
        let mut sim = sim();
        sim.state_mut().spawn_emitter(Vec2::new(100.0, 200.0), Vec2::new(100.0, 50.0));
        let mut list = DrawList::new();
        sim.render(&mut list);
        assert!(!list.pending().iter().any(|c| matches!(
            c,
            DrawCommand::Line { color: SELECTION_COLOR, .. }
        )));
    }

    #[test]
    fn test_close_stops_before_update() {
        let mut sim = sim();
        let id = sim.state_mut().add_emitter(|id| {
            crate::emitter::Emitter::new(id, Vec2::ZERO, Vec2::new(100.0, 50.0)).with_intensity(1.0)
        });
        let mut list = DrawList::new();
        let flow = sim
            .frame(1.0 / 60.0, vec![InputEvent::Close, press(20.0, 20.0, 0.0)], &mut list)
            .unwrap();

        assert_eq!(flow, Flow::Exit);
        assert!(sim.state().emitter(id).unwrap().particles().is_empty());
        assert_eq!(list.frames_presented(), 0);
    }

    #[test]
    fn test_delete_in_same_frame_hides_drops() {
        let mut sim = sim();
        let id = sim.state_mut().add_emitter(|id| {
            crate::emitter::Emitter::new(id, Vec2::new(200.0, 200.0), Vec2::new(100.0, 50.0))
                .with_intensity(1.0)
        });
        sim.state_mut().set_active(Some(id));
        let mut list = DrawList::new();
        sim.frame(1.0 / 60.0, Vec::new(), &mut list).unwrap();
        let drop_color = sim.settings().drop_color;
        assert!(list
            .last_frame()
            .iter()
            .any(|c| matches!(c, DrawCommand::Line { color, .. } if *color == drop_color)));

        // "Delete Cloud" button.
        sim.frame(1.0 / 60.0, vec![press(400.0, 80.0, 1.0)], &mut list).unwrap();
        let drop_color = sim.settings().drop_color;
        assert!(!list
            .last_frame()
            .iter()
            .any(|c| matches!(c, DrawCommand::Line { color, .. } if *color == drop_color)));
    }

    #[test]
    fn test_run_until_close() {
        let mut sim = sim();
        let mut input = ScriptedInput::new(vec![
            vec![press(20.0, 20.0, 0.0)],
            vec![],
            vec![InputEvent::PointerMove {
                position: Vec2::ZERO,
                delta: Vec2::ONE,
                buttons: ButtonMask::NONE,
            }],
            vec![InputEvent::Close],
        ]);
        let mut list = DrawList::new();
        let mut clock = FixedClock::new(1.0 / 60.0);

        sim.run(&mut input, &mut list, &mut clock).unwrap();

        assert_eq!(clock.frames(), 4);
        assert_eq!(list.frames_presented(), 3);
        // First frame clicked "Add Cloud".
        assert_eq!(sim.state().emitters().len(), 1);
    }

    #[test]
    fn test_rain_field_is_ticked_and_drawn() {
        let mut sim = sim().with_rain_field(true);
        let count = sim.rain_field().map(RainField::len).unwrap();
        assert!(count >= sim.settings().min_drops as usize);

        let before = sim.rain_field().unwrap().drops()[0].position;
        sim.update(0.1);
        let after = sim.rain_field().unwrap().drops()[0].position;
        assert_ne!(before, after);

        let mut list = DrawList::new();
        sim.render(&mut list);
        let lines = list
            .pending()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, count);
    }

    #[test]
    fn test_toggle_pause_through_button() {
        let mut sim = sim();
        let mut list = DrawList::new();
        // "Pause" button.
        sim.frame(0.0, vec![press(200.0, 80.0, 0.0)], &mut list).unwrap();
        assert!(sim.is_paused());
        let label = sim
            .controller()
            .controls()
            .iter()
            .find(|c| c.command() == Command::TogglePause)
            .map(|c| c.label.clone());
        assert_eq!(label.as_deref(), Some(crate::ui::RESUME_LABEL));
    }
}
