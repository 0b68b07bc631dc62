use crate::Params;
use serde::Deserialize;
use thiserror::Error;

/// Rejected simulator configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("radius range must satisfy 0 < min <= max, got {min}..={max}")]
    RadiusRange { min: f32, max: f32 },

    #[error("speed band must satisfy 0 <= min <= max, got {min}..={max}")]
    SpeedBand { min: f32, max: f32 },

    #[error("low speed threshold {0} must lie in 0..speed_max")]
    LowSpeedThreshold(f32),

    #[error("acceleration magnitude must be finite and non-negative, got {0}")]
    Acceleration(f32),

    #[error("viewport must be positive, got {width}x{height}")]
    Viewport { width: f32, height: f32 },
}

/// Simulation configuration
///
/// Every field falls back to its [`Params`] default when a host overrides
/// only part of it, e.g. `{"speed_max": 1.2}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub radius_min: f32,
    pub radius_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub low_speed_threshold: f32,
    pub acceleration: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius_min: Params::RADIUS_MIN,
            radius_max: Params::RADIUS_MAX,
            speed_min: Params::SPEED_MIN,
            speed_max: Params::SPEED_MAX,
            low_speed_threshold: Params::LOW_SPEED_THRESHOLD,
            acceleration: Params::ACCELERATION,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = |v: f32| v.is_finite();

        if !(finite(self.radius_min) && finite(self.radius_max))
            || self.radius_min <= 0.0
            || self.radius_min > self.radius_max
        {
            return Err(ConfigError::RadiusRange {
                min: self.radius_min,
                max: self.radius_max,
            });
        }

        if !(finite(self.speed_min) && finite(self.speed_max))
            || self.speed_min < 0.0
            || self.speed_min > self.speed_max
        {
            return Err(ConfigError::SpeedBand {
                min: self.speed_min,
                max: self.speed_max,
            });
        }

        if !finite(self.low_speed_threshold)
            || self.low_speed_threshold < 0.0
            || self.low_speed_threshold >= self.speed_max
        {
            return Err(ConfigError::LowSpeedThreshold(self.low_speed_threshold));
        }

        if !finite(self.acceleration) || self.acceleration < 0.0 {
            return Err(ConfigError::Acceleration(self.acceleration));
        }

        Ok(())
    }
}
