use crate::constants::SCAN_TIME_CONSTANT_MS;
use std::f64::consts::TAU;

/// Sinusoidal sweep of the distortion parameter between 0 and 1.
///
/// `phase = ((now - start) / time_constant) mod 2π`, value `(sin(phase) + 1) / 2`.
/// The sweep starts at 0.5 and rises; one full cycle lasts `2π * time_constant`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AutoScan {
    start_ms: f64,
    time_constant_ms: f64,
}

impl AutoScan {
    pub fn new(start_ms: f64) -> Self {
        Self::with_time_constant(start_ms, SCAN_TIME_CONSTANT_MS)
    }

    pub fn with_time_constant(start_ms: f64, time_constant_ms: f64) -> Self {
        Self {
            start_ms,
            time_constant_ms,
        }
    }

    /// Restart the sweep at `now_ms`.
    pub fn restart(&mut self, now_ms: f64) {
        self.start_ms = now_ms;
    }

    pub fn period_ms(&self) -> f64 {
        TAU * self.time_constant_ms
    }

    pub fn phase(&self, now_ms: f64) -> f64 {
        ((now_ms - self.start_ms) / self.time_constant_ms).rem_euclid(TAU)
    }

    pub fn sample(&self, now_ms: f64) -> f32 {
        ((self.phase(now_ms).sin() + 1.0) * 0.5) as f32
    }
}

impl Default for AutoScan {
    fn default() -> Self {
        Self::new(0.0)
    }
}
