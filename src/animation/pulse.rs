use std::f32::consts::PI;

use crate::clock::ClockSample;

/// Length of one pulse cycle in milliseconds
pub const PULSE_CYCLE_MS: u32 = 2000;

/// Position inside the 2-second pulse cycle, anchored so that zero falls on
/// the start of every even second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PulsePhase {
    cycle_pos_ms: u32,
}

impl PulsePhase {
    pub fn from_sample(sample: &ClockSample) -> Self {
        Self {
            cycle_pos_ms: (sample.second % 2) * 1000 + sample.millisecond,
        }
    }

    /// Animation start delay that lines the cycle up with wall time.
    /// Always zero or negative.
    pub fn delay_ms(&self) -> i32 {
        -(self.cycle_pos_ms as i32)
    }
}

/// Brightness pulse for the colon, peaking at the start of each cycle
#[derive(Debug, Clone)]
pub struct PulseAnimation {
    position_ms: f32,
    period_ms: f32,
    min_value: f32,
    max_value: f32,
}

impl PulseAnimation {
    pub fn new(period_ms: u32) -> Self {
        Self {
            position_ms: 0.0,
            period_ms: period_ms.max(1) as f32,
            min_value: 0.35,
            max_value: 1.0,
        }
    }

    /// Restart the cycle at the given phase
    pub fn restart(&mut self, phase: PulsePhase) {
        self.position_ms = (-phase.delay_ms()) as f32 % self.period_ms;
    }

    /// Advance by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.position_ms = (self.position_ms + dt * 1000.0) % self.period_ms;
    }

    #[cfg(test)]
    pub fn position_ms(&self) -> f32 {
        self.position_ms
    }

    /// Current brightness
    pub fn value(&self) -> f32 {
        let angle = self.position_ms / self.period_ms * 2.0 * PI;
        let normalized = (angle.cos() + 1.0) / 2.0;
        self.min_value + normalized * (self.max_value - self.min_value)
    }
}

impl Default for PulseAnimation {
    fn default() -> Self {
        Self::new(PULSE_CYCLE_MS)
    }
}
