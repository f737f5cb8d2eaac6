//! Looping background rain.
//!
//! Unlike cloud drops, field drops are never destroyed: a drop that
//! falls out of the viewport restarts at the top edge with fresh
//! parameters, so the drop count stays fixed for the whole run.

use crate::particle::Particle;
use crate::settings::Settings;
use crate::surface::Surface;
use glam::Vec2;
use rand::Rng;

/// A fixed-size set of recycled drops covering the viewport.
#[derive(Debug, Clone)]
pub struct RainField {
    drops: Vec<Particle>,
    viewport: Vec2,
}

impl RainField {
    /// Scatter between `min_drops` and `max_drops` drops over the viewport.
    pub fn new<R: Rng + ?Sized>(settings: &Settings, viewport: Vec2, rng: &mut R) -> Self {
        let count = settings.sample_drop_count(rng);
        let drops = (0..count)
            .map(|_| {
                let origin = Vec2::new(
                    rng.gen_range(0.0..=viewport.x),
                    rng.gen_range(0.0..=viewport.y),
                );
                Particle::spawn(origin, 1.0, settings, rng)
            })
            .collect();

        Self { drops, viewport }
    }

    pub fn drops(&self) -> &[Particle] {
        &self.drops
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Advance every drop, recycling those that left the viewport.
    pub fn tick<R: Rng + ?Sized>(&mut self, dt: f32, settings: &Settings, rng: &mut R) {
        for drop in &mut self.drops {
            drop.advance(dt);
            if drop.is_offscreen(self.viewport.y) {
                let x = rng.gen_range(0.0..=self.viewport.x);
                drop.recycle(x, settings, rng);
            }
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, settings: &Settings) {
        for drop in &self.drops {
            drop.render(surface, settings.drop_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_drop_count_within_bounds() {
        let settings = Settings {
            min_drops: 30,
            max_drops: 40,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(12);
        for _ in 0..20 {
            let field = RainField::new(&settings, VIEWPORT, &mut rng);
            assert!(field.len() >= 30 && field.len() <= 40);
        }
    }

    #[test]
    fn test_drops_are_recycled_not_destroyed() {
        let settings = Settings {
            min_drops: 25,
            max_drops: 25,
            min_angle: 0.0,
            max_angle: 0.0,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(6);
        let mut field = RainField::new(&settings, VIEWPORT, &mut rng);

        // Long enough for every drop to cross the viewport several times.
        for _ in 0..600 {
            field.tick(1.0 / 60.0, &settings, &mut rng);
            assert_eq!(field.len(), 25);
            for drop in field.drops() {
                assert!(drop.position.y <= VIEWPORT.y);
                assert!(drop.position.x >= 0.0 && drop.position.x <= VIEWPORT.x);
            }
        }
    }

    #[test]
    fn test_empty_field() {
        let settings = Settings {
            min_drops: 0,
            max_drops: 0,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(1);
        let mut field = RainField::new(&settings, VIEWPORT, &mut rng);
        field.tick(1.0, &settings, &mut rng);
        assert!(field.is_empty());
    }
}
