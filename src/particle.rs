//! Raindrops.
//!
//! A drop moves in a straight line at constant speed. Its angle is
//! measured from straight down, positive angles tilting toward +x:
//!
//! ```text
//! dy = speed * dt * cos(angle)
//! dx = speed * dt * sin(angle)
//! ```

use crate::geometry::Rgb;
use crate::settings::Settings;
use crate::surface::Surface;
use glam::Vec2;
use rand::Rng;

/// Stroke width of a drop in pixels.
pub const DROP_WIDTH: f32 = 2.0;

/// A single falling drop.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Pixels per second.
    pub speed: f32,
    /// Direction of travel in degrees, 0 = straight down.
    pub angle: f32,
    /// Visual stroke length in pixels.
    pub length: f32,
}

impl Particle {
    /// Create a drop at `origin` with parameters drawn from `settings`.
    ///
    /// The drawn speed is multiplied by `velocity_factor`.
    pub fn spawn<R: Rng + ?Sized>(
        origin: Vec2,
        velocity_factor: f32,
        settings: &Settings,
        rng: &mut R,
    ) -> Self {
        Self {
            position: origin,
            speed: settings.sample_speed(rng) * velocity_factor,
            angle: settings.sample_angle(rng),
            length: settings.sample_length(rng),
        }
    }

    /// Unit direction of travel in screen space.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        let rad = self.angle.to_radians();
        Vec2::new(rad.sin(), rad.cos())
    }

    /// Move the drop along its direction for `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        let rad = self.angle.to_radians();
        self.position.y += self.speed * dt * rad.cos();
        self.position.x += self.speed * dt * rad.sin();
    }

    /// True once the drop has fallen below the viewport.
    #[inline]
    pub fn is_offscreen(&self, viewport_height: f32) -> bool {
        self.position.y > viewport_height
    }

    /// Restart the drop at the top edge with fresh parameters.
    pub fn recycle<R: Rng + ?Sized>(&mut self, x: f32, settings: &Settings, rng: &mut R) {
        *self = Self::spawn(Vec2::new(x, 0.0), 1.0, settings, rng);
    }

    /// Far end of the drop's stroke.
    pub fn tail(&self) -> Vec2 {
        self.position + self.direction() * self.length
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, color: Rgb) {
        surface.draw_line(self.position, self.tail(), color, DROP_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, DrawList};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn drop_at(x: f32, y: f32, speed: f32, angle: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            speed,
            angle,
            length: 10.0,
        }
    }

    #[test]
    fn test_advance_follows_kinematic_law() {
        let cases = [(100.0, 0.0), (250.0, 15.0), (80.0, -30.0), (400.0, 90.0)];
        for (speed, angle) in cases {
            let mut p = drop_at(10.0, 20.0, speed, angle);
            let before = p.position;
            let dt = 1.0 / 60.0;
            p.advance(dt);

            let rad = (angle as f32).to_radians();
            let dy = p.position.y - before.y;
            let dx = p.position.x - before.x;
            assert!((dy - speed * dt * rad.cos()).abs() < 1e-4, "dy for angle {}", angle);
            assert!((dx - speed * dt * rad.sin()).abs() < 1e-4, "dx for angle {}", angle);
        }
    }

    #[test]
    fn test_straight_down_leaves_viewport() {
        let mut p = drop_at(100.0, 590.0, 50.0, 0.0);
        p.advance(1.0);
        assert_eq!(p.position, Vec2::new(100.0, 640.0));
        assert!(p.is_offscreen(600.0));
    }

    #[test]
    fn test_offscreen_is_strict() {
        assert!(!drop_at(0.0, 600.0, 0.0, 0.0).is_offscreen(600.0));
        assert!(drop_at(0.0, 600.5, 0.0, 0.0).is_offscreen(600.0));
    }

    #[test]
    fn test_spawn_scales_speed_by_velocity_factor() {
        let settings = Settings {
            min_speed: 100.0,
            max_speed: 100.0,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(3);
        let p = Particle::spawn(Vec2::new(5.0, 6.0), 1.5, &settings, &mut rng);
        assert_eq!(p.position, Vec2::new(5.0, 6.0));
        assert!((p.speed - 150.0).abs() < 1e-4);
        assert!(p.angle >= settings.min_angle && p.angle <= settings.max_angle);
        assert!(p.length >= settings.min_length && p.length <= settings.max_length);
    }

    #[test]
    fn test_render_draws_tail_along_direction() {
        let p = drop_at(0.0, 0.0, 10.0, 0.0);
        let mut list = DrawList::new();
        p.render(&mut list, Rgb::new(1, 2, 3));

        match &list.pending()[0] {
            DrawCommand::Line { from, to, color, width } => {
                assert_eq!(*from, Vec2::ZERO);
                assert!((to.y - 10.0).abs() < 1e-5);
                assert!(to.x.abs() < 1e-5);
                assert_eq!(*color, Rgb::new(1, 2, 3));
                assert_eq!(*width, DROP_WIDTH);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn test_recycle_restarts_at_top() {
        let settings = Settings::default();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut p = drop_at(10.0, 900.0, 1.0, 0.0);
        p.recycle(42.0, &settings, &mut rng);
        assert_eq!(p.position, Vec2::new(42.0, 0.0));
        assert!(p.speed >= settings.min_speed && p.speed <= settings.max_speed);
    }
}
