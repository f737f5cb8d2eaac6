//! winit application driving a [`SimulationLoop`].
//!
//! Window events are queued into an [`InputQueue`]; a frame runs once
//! the [`FrameClock`] deadline passes, and the event loop sleeps until
//! the next deadline in between.

use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

use crate::error::SimulationError;
use crate::gpu::Renderer;
use crate::input::{InputQueue, InputSource};
use crate::simulation::{Flow, SimulationLoop};
use crate::time::{Clock, FrameClock};

/// Frames between window title FPS refreshes.
const TITLE_REFRESH_FRAMES: u64 = 30;

/// Window creation parameters.
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub target_fps: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "Rain Clouds".into(),
            width: 800,
            height: 600,
            target_fps: 60,
        }
    }
}

pub(crate) struct App {
    sim: SimulationLoop,
    options: WindowOptions,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    input: InputQueue,
    clock: FrameClock,
    error: Option<SimulationError>,
}

impl App {
    pub(crate) fn new(sim: SimulationLoop, options: WindowOptions) -> Self {
        let clock = FrameClock::new(options.target_fps);
        Self {
            sim,
            options,
            window: None,
            renderer: None,
            input: InputQueue::new(),
            clock,
            error: None,
        }
    }

    /// Consume the app after the event loop returned.
    pub(crate) fn finish(self) -> Result<(), SimulationError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: SimulationError) {
        error!("{}", err);
        self.error = Some(err);
        event_loop.exit();
    }

    fn run_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };

        let dt = self.clock.elapsed_since_last_frame();
        let events = self.input.drain();

        match self.sim.frame(dt, events, renderer) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => {
                info!("Window closed");
                event_loop.exit();
                return;
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => renderer.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => warn!("Render error: {:?}", e),
        }

        if self.clock.frame() % TITLE_REFRESH_FRAMES == 0 {
            renderer.window().set_title(&format!(
                "{} - {:.0} FPS",
                self.options.title,
                self.clock.fps()
            ));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(self.options.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.options.width,
                self.options.height,
            ))
            .with_resizable(false);

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match pollster::block_on(Renderer::new(window.clone())) {
            Ok(renderer) => {
                self.window = Some(window);
                self.renderer = Some(renderer);
                // Window and GPU setup must not count toward the first frame.
                self.clock.reset();
                event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now()));
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size);
                }
            }
            other => self.input.handle_event(&other),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_none() {
            return;
        }

        if Instant::now() >= self.clock.next_frame_deadline() {
            self.run_frame(event_loop);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.clock.next_frame_deadline()));
    }
}
