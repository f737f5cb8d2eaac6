//! # Raincloud - interactive rain cloud simulation
//!
//! Clouds float in a 2D window and rain streak-shaped drops onto the
//! ground. A row of buttons adds clouds and tunes the selected one;
//! clouds can be dragged with the left mouse button and deleted with a
//! double click.
//!
//! ## Quick Start
//!
//! ```ignore
//! use raincloud::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     Simulation::new(Settings::default())
//!         .with_viewport(800, 600)
//!         .with_target_fps(60)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Clouds and drops
//!
//! An [`Emitter`] is a cloud. Each step it spawns at most one
//! [`Particle`] with probability equal to its rain intensity, moves its
//! drops, and drops the ones that fell below the window.
//!
//! ### Frames
//!
//! [`SimulationLoop`] runs every frame as input, then update, then
//! render. It only talks to the outside world through three traits:
//!
//! | Trait | Window backend | Headless |
//! |-------|----------------|----------|
//! | [`InputSource`] | [`InputQueue`] | [`ScriptedInput`] |
//! | [`Surface`] | `gpu::Renderer` | [`DrawList`] |
//! | [`Clock`] | [`FrameClock`] | [`FixedClock`] |
//!
//! so a whole session can be replayed without a window:
//!
//! ```ignore
//! let mut sim = SimulationLoop::new(Settings::default(), Vec2::new(800.0, 600.0))?;
//! let mut clock = FixedClock::new(1.0 / 60.0);
//! sim.run(&mut ScriptedInput::new(frames), &mut DrawList::new(), &mut clock)?;
//! ```
//!
//! ### Buttons
//!
//! | Button | Effect |
//! |--------|--------|
//! | Add Cloud | new 100x50 cloud at a random spot |
//! | Change Shape | rectangle, ellipse, custom, rectangle... |
//! | More Rain / Less Rain | intensity +/- 0.1, kept in 0.0-1.0 |
//! | Speed Up / Slow Down | velocity factor x / ÷ 1.2 |
//! | Pause | freeze every cloud, label becomes "Resume" |
//! | Delete Cloud | remove the selected cloud |

pub mod config;
pub mod emitter;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod interaction;
pub mod particle;
pub mod rain_field;
pub mod settings;
pub mod simulation;
pub mod state;
pub mod surface;
pub mod time;
pub mod ui;
mod window;

pub use config::{AppConfig, WindowConfig};
pub use emitter::{CloudShape, Emitter, EmitterId};
pub use error::{ConfigError, GpuError, SimulationError};
pub use geometry::{Rect, Rgb};
pub use glam::Vec2;
pub use input::{ButtonMask, InputEvent, InputQueue, InputSource, MouseButton, ScriptedInput};
pub use interaction::InteractionController;
pub use particle::Particle;
pub use rain_field::RainField;
pub use settings::Settings;
pub use simulation::{Flow, Simulation, SimulationLoop};
pub use state::SimulationState;
pub use surface::{DrawCommand, DrawList, Surface};
pub use time::{Clock, FixedClock, FrameClock};
pub use ui::{Button, Command};
pub use window::WindowOptions;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use raincloud::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::emitter::{CloudShape, Emitter};
    pub use crate::error::SimulationError;
    pub use crate::geometry::{Rect, Rgb};
    pub use crate::input::{InputEvent, InputSource, MouseButton, ScriptedInput};
    pub use crate::settings::Settings;
    pub use crate::simulation::{Flow, Simulation, SimulationLoop};
    pub use crate::surface::{DrawList, Surface};
    pub use crate::time::{Clock, FixedClock, FrameClock};
    pub use crate::Vec2;
}
