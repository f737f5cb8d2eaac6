//! Simulation parameters for raindrops.
//!
//! [`Settings`] is read-only once validated. Every randomized drop
//! parameter is drawn uniformly from one of its `min..=max` pairs.

use crate::error::ConfigError;
use crate::geometry::Rgb;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bounds for drop parameters plus the two scene colors.
///
/// Angles are in degrees, 0 meaning straight down. Speeds are in
/// pixels per second, lengths in pixels.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Fewest drops in a looping rain field.
    pub min_drops: u32,
    /// Most drops in a looping rain field.
    pub max_drops: u32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_angle: f32,
    pub max_angle: f32,
    pub min_length: f32,
    pub max_length: f32,
    pub drop_color: Rgb,
    pub background_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_drops: 100,
            max_drops: 200,
            min_speed: 200.0,
            max_speed: 400.0,
            min_angle: -10.0,
            max_angle: 10.0,
            min_length: 10.0,
            max_length: 20.0,
            drop_color: Rgb::new(120, 160, 255),
            background_color: Rgb::new(25, 25, 40),
        }
    }
}

impl Settings {
    /// Check that every `min_*` is less than or equal to its `max_*` and
    /// that every float range can be sampled.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_order("drops", self.min_drops, self.max_drops)?;
        check_range("speed", self.min_speed, self.max_speed)?;
        check_range("angle", self.min_angle, self.max_angle)?;
        check_range("length", self.min_length, self.max_length)?;
        Ok(())
    }

    /// Consume and return the settings if they are valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    #[inline]
    pub fn sample_speed<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min_speed..=self.max_speed)
    }

    #[inline]
    pub fn sample_angle<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min_angle..=self.max_angle)
    }

    #[inline]
    pub fn sample_length<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        rng.gen_range(self.min_length..=self.max_length)
    }

    #[inline]
    pub fn sample_drop_count<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min_drops..=self.max_drops)
    }
}

fn check_order<T>(field: &'static str, min: T, max: T) -> Result<(), ConfigError>
where
    T: PartialOrd + Into<f64>,
{
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange {
            field,
            min: min.into(),
            max: max.into(),
        })
    }
}

fn check_range(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    // Uniform sampling divides the span by just under 1.0, which must stay finite.
    let span = (max - min) / (1.0 - f32::EPSILON);
    if !(min.is_finite() && max.is_finite() && span.is_finite()) {
        return Err(ConfigError::NonFiniteRange { field, min, max });
    }
    check_order(field, min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_speed_rejected() {
        let settings = Settings {
            min_speed: 500.0,
            max_speed: 100.0,
            ..Default::default()
        };
        match settings.validate() {
            Err(ConfigError::InvertedRange { field, .. }) => assert_eq!(field, "speed"),
            other => panic!("expected inverted speed range, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_drops_rejected() {
        let settings = Settings {
            min_drops: 10,
            max_drops: 5,
            ..Default::default()
        };
        assert!(settings.validated().is_err());
    }

    #[test]
    fn test_drop_counts_compared_exactly() {
        // Both values round to the same f32.
        let settings = Settings {
            min_drops: 16_777_217,
            max_drops: 16_777_216,
            ..Default::default()
        };
        match settings.validate() {
            Err(ConfigError::InvertedRange { field, min, max }) => {
                assert_eq!(field, "drops");
                assert_eq!(min, 16_777_217.0);
                assert_eq!(max, 16_777_216.0);
            }
            other => panic!("expected inverted drops range, got {:?}", other),
        }
    }

    #[test]
    fn test_unsampleable_ranges_rejected() {
        let cases = [
            (f32::INFINITY, f32::INFINITY),
            (0.0, f32::INFINITY),
            (f32::NEG_INFINITY, 0.0),
            (f32::NAN, 1.0),
            (-3e38, 3e38),
        ];
        for (min, max) in cases {
            let settings = Settings {
                min_speed: min,
                max_speed: max,
                ..Default::default()
            };
            assert!(
                matches!(
                    settings.validate(),
                    Err(ConfigError::NonFiniteRange { field: "speed", .. })
                ),
                "{}..={} accepted",
                min,
                max
            );
        }
    }

    #[test]
    fn test_wide_but_finite_range_samples() {
        let settings = Settings {
            min_length: -1e38,
            max_length: 1e38,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());
        let mut rng = SmallRng::seed_from_u64(3);
        let length = settings.sample_length(&mut rng);
        assert!(length.is_finite());
    }

    #[test]
    fn test_equal_bounds_sample_exact_value() {
        let settings = Settings {
            min_speed: 42.0,
            max_speed: 42.0,
            min_angle: 0.0,
            max_angle: 0.0,
            ..Default::default()
        };
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(settings.sample_speed(&mut rng), 42.0);
        assert_eq!(settings.sample_angle(&mut rng), 0.0);
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let settings = Settings::default();
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..1000 {
            let length = settings.sample_length(&mut rng);
            assert!(length >= settings.min_length && length <= settings.max_length);
            let count = settings.sample_drop_count(&mut rng);
            assert!(count >= settings.min_drops && count <= settings.max_drops);
        }
    }
}
