//! # Scaled Clock
//!
//! The single source of time for a session. Every timer (cooking, decay, eating) advances by
//! the [`Tick::delta`] this clock hands out, never by wall-clock time, so speed changes and
//! pausing affect all timers at once.

use tracing::{debug, info};

/// Seconds of simulated time.
pub type Seconds = f64;

/// Slowest supported speed multiplier.
pub const MIN_SPEED: f64 = 0.1;
/// Fastest supported speed multiplier.
pub const MAX_SPEED: f64 = 40.0;

/// One advance of the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Scaled time elapsed during this step. Zero while paused.
    pub delta: Seconds,
    /// Accumulated simulated time after this step.
    pub now: Seconds,
}

#[derive(Debug, Clone)]
pub struct Clock {
    speed: f64,
    paused: bool,
    now: Seconds,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Clock {
    pub fn new(speed: f64) -> Self {
        Self {
            speed: clamp_speed(speed),
            paused: false,
            now: 0.0,
        }
    }

    pub fn now(&self) -> Seconds {
        self.now
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Sets the multiplier, clamped to `[MIN_SPEED, MAX_SPEED]`. Returns the applied value.
    pub fn set_speed(&mut self, speed: f64) -> f64 {
        self.speed = clamp_speed(speed);
        info!(speed = self.speed, "Clock speed changed");
        self.speed
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            info!(paused, now = self.now, "Clock pause toggled");
        }
        self.paused = paused;
    }

    /// Advances by `raw_delta` real seconds scaled by the multiplier.
    /// Negative or non-finite input counts as zero.
    pub fn advance(&mut self, raw_delta: Seconds) -> Tick {
        let raw = if raw_delta.is_finite() { raw_delta.max(0.0) } else { 0.0 };
        let delta = if self.paused { 0.0 } else { raw * self.speed };
        self.now += delta;
        debug!(delta, now = self.now, "Clock advanced");
        Tick {
            delta,
            now: self.now,
        }
    }
}

fn clamp_speed(speed: f64) -> f64 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        1.0
    }
}
