//! Rain clouds: shaped emitters that own their raindrops.
//!
//! Each tick a cloud spawns at most one drop, with probability equal to
//! its rain intensity, then moves every drop it owns and forgets the
//! ones that fell out of the viewport.
//!
//! # Spawn points
//!
//! | Shape | Spawn point |
//! |-------|-------------|
//! | [`CloudShape::Rectangle`] | Uniform along the bottom edge |
//! | [`CloudShape::Ellipse`] | Polar sample inside the inscribed ellipse |
//! | [`CloudShape::Custom`] | As ellipse, 20% of drops shifted toward the ears |
//!
//! The ellipse sample draws the radius linearly, so drops cluster near
//! the center rather than covering the area uniformly.

use crate::geometry::{Rect, Rgb};
use crate::particle::Particle;
use crate::settings::Settings;
use crate::surface::Surface;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

/// Fill color of every cloud body.
pub const CLOUD_COLOR: Rgb = Rgb::new(200, 200, 200);

/// Rain intensity of a freshly created cloud.
pub const DEFAULT_INTENSITY: f32 = 0.1;

/// Chance that a custom-shaped cloud shifts a spawn point toward its ears.
const EAR_JITTER_CHANCE: f32 = 0.2;

/// Outline of a cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CloudShape {
    #[default]
    Rectangle,
    Ellipse,
    /// Ellipse with two round ears on the top corners.
    Custom,
}

impl CloudShape {
    /// The shape after this one in the Rectangle, Ellipse, Custom cycle.
    pub fn next(self) -> Self {
        match self {
            CloudShape::Rectangle => CloudShape::Ellipse,
            CloudShape::Ellipse => CloudShape::Custom,
            CloudShape::Custom => CloudShape::Rectangle,
        }
    }
}

/// Stable key of a cloud within a [`crate::state::SimulationState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmitterId(pub(crate) u64);

/// A rain cloud.
#[derive(Debug, Clone)]
pub struct Emitter {
    id: EmitterId,
    /// Top-left corner of the bounding box.
    pub position: Vec2,
    pub size: Vec2,
    pub shape: CloudShape,
    particles: Vec<Particle>,
    rain_intensity: f32,
    velocity_factor: f32,
}

impl Emitter {
    pub fn new(id: EmitterId, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            position,
            size,
            shape: CloudShape::Rectangle,
            particles: Vec::new(),
            rain_intensity: DEFAULT_INTENSITY,
            velocity_factor: 1.0,
        }
    }

    pub fn with_shape(mut self, shape: CloudShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the intensity, clamped to 0.0-1.0.
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.rain_intensity = intensity.clamp(0.0, 1.0);
        self
    }

    pub fn with_velocity_factor(mut self, factor: f32) -> Self {
        self.velocity_factor = factor;
        self
    }

    #[inline]
    pub fn id(&self) -> EmitterId {
        self.id
    }

    /// Per-tick spawn probability.
    #[inline]
    pub fn rain_intensity(&self) -> f32 {
        self.rain_intensity
    }

    /// Multiplier applied to the speed of every new drop.
    #[inline]
    pub fn velocity_factor(&self) -> f32 {
        self.velocity_factor
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Pick where the next drop appears for the given shape.
    pub fn spawn_point_for<R: Rng + ?Sized>(&self, shape: CloudShape, rng: &mut R) -> Vec2 {
        let Vec2 { x, y } = self.position;
        let Vec2 { x: w, y: h } = self.size;

        match shape {
            CloudShape::Rectangle => Vec2::new(rng.gen_range(x..=x + w), y + h),
            CloudShape::Ellipse => self.ellipse_point(rng),
            CloudShape::Custom => {
                let mut point = self.ellipse_point(rng);
                if rng.gen::<f32>() < EAR_JITTER_CHANCE {
                    point.x += rng.gen_range(-w / 4.0..=w / 4.0);
                    point.y -= h / 4.0;
                }
                point
            }
        }
    }

    fn ellipse_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let theta = rng.gen_range(0.0..TAU);
        let r: f32 = rng.gen_range(0.0..=1.0);
        let half = self.size * 0.5;
        self.position + half + r * Vec2::new(half.x * theta.cos(), half.y * theta.sin())
    }

    /// Spawn, advance and cull drops for one step of `dt` seconds.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        settings: &Settings,
        viewport_height: f32,
        rng: &mut R,
    ) {
        if rng.gen::<f32>() < self.rain_intensity {
            let origin = self.spawn_point_for(self.shape, rng);
            self.particles
                .push(Particle::spawn(origin, self.velocity_factor, settings, rng));
        }

        for drop in &mut self.particles {
            drop.advance(dt);
        }

        self.particles.retain(|drop| !drop.is_offscreen(viewport_height));
    }

    pub fn set_shape(&mut self, shape: CloudShape) {
        self.shape = shape;
    }

    /// Advance to the next shape in the cycle and return it.
    pub fn cycle_shape(&mut self) -> CloudShape {
        self.shape = self.shape.next();
        self.shape
    }

    /// Add `delta` to the intensity, keeping it within 0.0-1.0.
    pub fn adjust_intensity(&mut self, delta: f32) {
        self.rain_intensity = (self.rain_intensity + delta).clamp(0.0, 1.0);
    }

    /// Multiply the velocity factor. There is no upper or lower bound.
    pub fn adjust_velocity_factor(&mut self, multiplier: f32) {
        self.velocity_factor *= multiplier;
    }

    /// Bounding-box hit test, the same for every shape.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.bounds().contains(point)
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Draw the cloud body and then every drop it owns.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, drop_color: Rgb) {
        let bounds = self.bounds();
        match self.shape {
            CloudShape::Rectangle => surface.fill_rect(bounds, CLOUD_COLOR),
            CloudShape::Ellipse => surface.fill_ellipse(bounds, CLOUD_COLOR),
            CloudShape::Custom => {
                surface.fill_ellipse(bounds, CLOUD_COLOR);
                for ear in self.ears() {
                    surface.fill_ellipse(ear, CLOUD_COLOR);
                }
            }
        }

        for drop in &self.particles {
            drop.render(surface, drop_color);
        }
    }

    /// Ear circles centered on the two top corners.
    fn ears(&self) -> [Rect; 2] {
        let ear = self.size.x / 4.0;
        let top = self.position.y - ear / 2.0;
        [
            Rect::new(self.position.x - ear / 2.0, top, ear, ear),
            Rect::new(self.position.x + self.size.x - ear / 2.0, top, ear, ear),
        ]
    }
}
