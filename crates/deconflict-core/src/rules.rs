//! Safety thresholds and sampling settings for deconfliction runs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default minimum separation in meters.
pub const DEFAULT_SAFETY_DISTANCE_M: f64 = 5.0;
/// Default nominal sampling step in seconds.
pub const DEFAULT_TIME_STEP_S: f64 = 1.0;
/// Minimum sample count across an overlap window when the requested step is too coarse.
pub const DEFAULT_ADAPTIVE_DIVISOR: u32 = 20;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("safety distance must be a positive finite number of meters, got {0}")]
    InvalidSafetyDistance(f64),
    #[error("time step must be a positive finite number of seconds, got {0}")]
    InvalidTimeStep(f64),
    #[error("adaptive divisor must be at least 1")]
    InvalidAdaptiveDivisor,
}

/// Configuration for a deconfliction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSettings {
    /// Separation at or below which two aircraft conflict (meters)
    pub safety_distance_m: f64,
    /// Nominal sampling granularity (seconds)
    pub time_step_s: f64,
    /// Overlap windows no longer than the requested step are split into this many steps
    pub adaptive_divisor: u32,
    /// Also sample the overlap window's end instant when marching misses it
    pub sample_end_boundary: bool,
    /// Evaluate aircraft pairs on the rayon thread pool
    pub parallel: bool,
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self {
            safety_distance_m: DEFAULT_SAFETY_DISTANCE_M,
            time_step_s: DEFAULT_TIME_STEP_S,
            adaptive_divisor: DEFAULT_ADAPTIVE_DIVISOR,
            sample_end_boundary: false,
            parallel: false,
        }
    }
}

impl DetectionSettings {
    /// Validated settings with default sampling policy.
    pub fn new(safety_distance_m: f64, time_step_s: f64) -> Result<Self, ConfigError> {
        let settings = Self {
            safety_distance_m,
            time_step_s,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn with_sample_end_boundary(mut self, enabled: bool) -> Self {
        self.sample_end_boundary = enabled;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn with_adaptive_divisor(mut self, divisor: u32) -> Result<Self, ConfigError> {
        self.adaptive_divisor = divisor;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.safety_distance_m.is_finite() && self.safety_distance_m > 0.0) {
            return Err(ConfigError::InvalidSafetyDistance(self.safety_distance_m));
        }
        if !(self.time_step_s.is_finite() && self.time_step_s > 0.0) {
            return Err(ConfigError::InvalidTimeStep(self.time_step_s));
        }
        if self.adaptive_divisor == 0 {
            return Err(ConfigError::InvalidAdaptiveDivisor);
        }
        Ok(())
    }

    /// Step actually used for an overlap window of `duration` seconds.
    ///
    /// A requested step at least as long as the window is replaced with
    /// `duration / adaptive_divisor`.
    pub fn effective_step(&self, duration: f64) -> f64 {
        effective_step(self.time_step_s, duration, self.adaptive_divisor)
    }
}

pub(crate) fn effective_step(time_step: f64, duration: f64, divisor: u32) -> f64 {
    if time_step >= duration {
        duration / f64::from(divisor)
    } else {
        time_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_values() {
        assert_eq!(
            DetectionSettings::new(0.0, 1.0),
            Err(ConfigError::InvalidSafetyDistance(0.0))
        );
        assert_eq!(
            DetectionSettings::new(5.0, -1.0),
            Err(ConfigError::InvalidTimeStep(-1.0))
        );
        assert!(DetectionSettings::new(f64::INFINITY, 1.0).is_err());
        assert!(DetectionSettings::new(5.0, f64::NAN).is_err());
        assert_eq!(
            DetectionSettings::default().with_adaptive_divisor(0),
            Err(ConfigError::InvalidAdaptiveDivisor)
        );
    }

    #[test]
    fn coarse_step_is_split_into_twenty() {
        let settings = DetectionSettings::new(5.0, 100.0).unwrap();
        assert_eq!(settings.effective_step(40.0), 2.0);
        assert_eq!(settings.effective_step(100.0), 5.0);
    }

    #[test]
    fn fine_step_is_kept() {
        let settings = DetectionSettings::new(5.0, 0.5).unwrap();
        assert_eq!(settings.effective_step(40.0), 0.5);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: DetectionSettings =
            serde_json::from_str(r#"{"safety_distance_m": 12.0}"#).unwrap();
        assert_eq!(settings.safety_distance_m, 12.0);
        assert_eq!(settings.time_step_s, DEFAULT_TIME_STEP_S);
        assert_eq!(settings.adaptive_divisor, 20);
    }
}
