//! Visual sync engine: turns clock samples into ring, tick, digit, pulse and
//! trigger state.
//!
//! All visual state is a function of the latest sample. `tick` runs every
//! frame and only touches what changed; `resync` rebuilds everything from one
//! sample and ends in the same state continuous ticking would have reached.

use tracing::debug;

use crate::animation::PulsePhase;
use crate::clock::{ClockSample, RingGeometry, TICK_COUNT};
use crate::state::DisplayPreferences;

use super::format::{DateDigits, TimeDigits};
use super::trigger::{TriggerEvent, TriggerGate};

/// Dynamic state of one tick mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickMark {
    pub elapsed: bool,
    pub active: bool,
}

/// What a `tick` or `resync` call changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOutcome {
    /// Sound to play, already gated
    pub trigger: Option<TriggerEvent>,
    /// A new second was reached and the tick marks were rebuilt
    pub second_changed: bool,
    /// Hour, minute, AM/PM and date were redrawn
    pub digits_redrawn: bool,
    /// The pulse animation must restart at `pulse_phase()`
    pub pulse_resynced: bool,
}

/// Identifies one wall-clock minute. Comparing the minute alone would miss a
/// jump of whole hours or days.
type MinuteKey = (u32, u32, u32, u32);

fn minute_key(sample: &ClockSample) -> MinuteKey {
    (sample.month, sample.day, sample.hour, sample.minute)
}

/// Second reached at a given ring progress
pub fn current_second(progress: f64) -> u32 {
    (progress * 60.0).floor() as u32 % 60
}

#[derive(Debug, Clone)]
pub struct VisualSyncEngine {
    circumference: f64,
    ring_offset: f64,
    marks: [TickMark; TICK_COUNT],
    last_second: Option<u32>,
    last_minute: Option<MinuteKey>,
    gate: TriggerGate,
    time: TimeDigits,
    date: DateDigits,
    pulse: PulsePhase,
}

impl VisualSyncEngine {
    pub fn new(geometry: &RingGeometry) -> Self {
        Self {
            circumference: geometry.circumference(),
            ring_offset: geometry.circumference(),
            marks: [TickMark::default(); TICK_COUNT],
            last_second: None,
            last_minute: None,
            gate: TriggerGate::new(),
            time: TimeDigits::default(),
            date: DateDigits::default(),
            pulse: PulsePhase::default(),
        }
    }

    /// Incremental per-frame update.
    ///
    /// The ring offset follows the sample every call. Tick marks and the
    /// trigger only change when a new second is reached; the marks are
    /// derived from the absolute second so dropped frames catch up at once.
    pub fn tick(&mut self, sample: &ClockSample, prefs: &DisplayPreferences) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        if prefs.show_seconds {
            let progress = sample.minute_progress();
            self.ring_offset = self.offset_for(progress);

            let second = current_second(progress);
            if self.last_second != Some(second) {
                self.apply_marks(second);
                outcome.trigger = self.gate.evaluate(second, prefs);
                outcome.second_changed = true;
                self.last_second = Some(second);
            }
            self.time.set_seconds(sample.second);
        }

        let key = minute_key(sample);
        if self.last_minute != Some(key) {
            self.last_minute = Some(key);
            self.refresh_digits(sample, prefs);
            self.pulse = PulsePhase::from_sample(sample);
            outcome.digits_redrawn = true;
            outcome.pulse_resynced = true;
        }

        outcome
    }

    /// Rebuild all visual state from a single sample, forgetting history.
    ///
    /// The trigger gate is still consulted, so a second already announced
    /// (for example by the background sampler) is not announced again.
    pub fn resync(&mut self, sample: &ClockSample, prefs: &DisplayPreferences) -> SyncOutcome {
        let progress = sample.minute_progress();
        let second = current_second(progress);

        self.ring_offset = self.offset_for(progress);
        self.apply_marks(second);
        self.last_second = Some(second);
        self.last_minute = Some(minute_key(sample));
        self.time.set_seconds(sample.second);
        self.refresh_digits(sample, prefs);
        self.pulse = PulsePhase::from_sample(sample);

        debug!(second, minute = sample.minute, "Resynced visuals");

        SyncOutcome {
            trigger: self.gate.evaluate(second, prefs),
            second_changed: true,
            digits_redrawn: true,
            pulse_resynced: true,
        }
    }

    /// Trigger evaluation without any visual update, for the background path
    pub fn background_tick(&mut self, second: u32, prefs: &DisplayPreferences) -> Option<TriggerEvent> {
        self.gate.evaluate(second, prefs)
    }

    /// Redraw hour, minute, AM/PM and date fields
    pub fn refresh_digits(&mut self, sample: &ClockSample, prefs: &DisplayPreferences) {
        let second = self.time.second;
        self.time = TimeDigits::from_sample(sample, prefs.use_24h);
        self.time.second = second;
        self.date = DateDigits::from_sample(sample);
    }

    /// Set every mark from the absolute current second
    fn apply_marks(&mut self, second: u32) {
        let second = second as usize;
        for (i, mark) in self.marks.iter_mut().enumerate() {
            *mark = TickMark {
                elapsed: i <= second,
                active: i == second,
            };
        }
    }

    fn offset_for(&self, progress: f64) -> f64 {
        self.circumference * (1.0 - progress)
    }

    /// Stroke-dash offset of the progress arc
    pub fn ring_offset(&self) -> f64 {
        self.ring_offset
    }

    /// State of mark `index`.
    ///
    /// # Panics
    /// If `index` is not in 0..60.
    #[cfg(test)]
    pub fn mark(&self, index: usize) -> TickMark {
        assert!(index < TICK_COUNT, "tick mark index {index} out of range");
        self.marks[index]
    }

    pub fn marks(&self) -> &[TickMark; TICK_COUNT] {
        &self.marks
    }

    pub fn time_digits(&self) -> &TimeDigits {
        &self.time
    }

    pub fn date_digits(&self) -> &DateDigits {
        &self.date
    }

    pub fn pulse_phase(&self) -> PulsePhase {
        self.pulse
    }

    pub fn last_second(&self) -> Option<u32> {
        self.last_second
    }
}
