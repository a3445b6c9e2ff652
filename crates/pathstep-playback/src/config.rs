//! Playback timing.

use std::time::Duration;

use thiserror::Error;

/// Slowest multiplier reachable with [`Playback::slow_down`](crate::Playback::slow_down).
pub const MIN_SPEED: f64 = 1.0 / 16.0;
/// Fastest multiplier reachable with [`Playback::speed_up`](crate::Playback::speed_up).
pub const MAX_SPEED: f64 = 64.0;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PlaybackError {
    #[error("speed multiplier must be finite and positive, got {0}")]
    InvalidSpeed(f64),
}

/// How fast automatic playback pulls steps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PlaybackConfig {
    /// Interval between pulls at speed 1.
    pub base_interval_ms: u64,
    /// Speed multiplier: 2 pulls twice as often, 0.5 half as often.
    pub speed: f64,
    /// Floor for the computed interval.
    pub min_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 100,
            speed: 1.0,
            min_interval_ms: 4,
        }
    }
}

impl PlaybackConfig {
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), PlaybackError> {
        check_speed(self.speed)
    }

    /// `base_interval_ms / speed`, never below `min_interval_ms`.
    pub fn interval(&self) -> Duration {
        let ms = (self.base_interval_ms as f64 / self.speed).max(self.min_interval_ms as f64);
        Duration::from_micros((ms * 1000.0).round() as u64)
    }
}

pub(crate) fn check_speed(speed: f64) -> Result<(), PlaybackError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(PlaybackError::InvalidSpeed(speed))
    }
}
