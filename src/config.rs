//! Playback configuration
//!
//! Everything here is transient and in memory: the CLI builds a
//! [`PlaybackConfig`] from its flags and hands it to each session.

use crate::error::{InputError, Result};
use std::time::Duration;

/// Default autoplay interval at 1x speed
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(1000);

/// Default delay between published steps of a paced run
pub const DEFAULT_PACE_DELAY: Duration = Duration::from_millis(800);

/// Largest array, tree, table or grid dimension a command accepts
pub const DEFAULT_MAX_ELEMENTS: usize = 128;

/// Largest magnitude accepted for a single value
pub const MAX_VALUE: i64 = 9999;

/// Preset speed multipliers offered by the terminal front end
pub const SPEED_PRESETS: [f64; 6] = [0.25, 0.5, 1.0, 2.0, 4.0, 10.0];

/// Slowest accepted speed multiplier
pub const MIN_SPEED: f64 = 0.01;

/// Fastest accepted speed multiplier
pub const MAX_SPEED: f64 = 100.0;

/// Reject speeds that are not finite or outside `MIN_SPEED..=MAX_SPEED`
pub fn check_speed(speed: f64) -> Result<f64> {
    if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(InputError::InvalidSpeed(speed));
    }
    Ok(speed)
}

/// `base / speed`, saturating at `Duration::MAX`
pub fn scaled(base: Duration, speed: f64) -> Duration {
    Duration::try_from_secs_f64(base.as_secs_f64() / speed).unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Autoplay interval at speed 1.0
    pub base_interval: Duration,
    /// Speed multiplier, must be positive
    pub speed: f64,
    /// Delay between steps of a paced run
    pub pace_delay: Duration,
    /// Publish tree/hash/linear operations one step at a time
    pub paced: bool,
    /// Start playing as soon as a batch timeline is installed
    pub autoplay: bool,
    pub max_elements: usize,
}

impl PlaybackConfig {
    /// Configuration with paced publication switched off, every operation
    /// installs its whole timeline at once.
    pub fn batch() -> Self {
        PlaybackConfig {
            paced: false,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_speed(self.speed)?;
        Ok(())
    }

    /// Delay between published steps of a paced run at the current speed
    pub fn pace_interval(&self) -> Duration {
        scaled(self.pace_delay, self.speed)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        PlaybackConfig {
            base_interval: DEFAULT_BASE_INTERVAL,
            speed: 1.0,
            pace_delay: DEFAULT_PACE_DELAY,
            paced: true,
            autoplay: false,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_bounds() {
        assert_eq!(check_speed(1.0), Ok(1.0));
        assert_eq!(check_speed(MAX_SPEED), Ok(MAX_SPEED));
        assert_eq!(check_speed(0.0), Err(InputError::InvalidSpeed(0.0)));
        assert!(check_speed(-2.0).is_err());
        assert!(check_speed(1e-20).is_err());
        assert!(check_speed(f64::INFINITY).is_err());
        assert!(check_speed(f64::NAN).is_err());
    }

    #[test]
    fn test_scaled_saturates() {
        let second = Duration::from_secs(1);
        assert_eq!(scaled(second, 4.0), Duration::from_millis(250));
        assert_eq!(scaled(Duration::MAX, 0.5), Duration::MAX);
    }

    #[test]
    fn test_pace_interval_follows_speed() {
        let config = PlaybackConfig {
            speed: 2.0,
            ..PlaybackConfig::default()
        };
        assert_eq!(config.pace_interval(), Duration::from_millis(400));
        assert!(PlaybackConfig {
            speed: 0.0,
            ..config
        }
        .validate()
        .is_err());
    }
}
