pub mod geometry;

pub use geometry::{RingGeometry, TICK_COUNT};

use chrono::{Datelike, Local, Timelike};

/// Milliseconds in one minute
pub const MINUTE_MS: u32 = 60_000;

/// Wall-clock time decomposed into the fields the clock face needs.
///
/// Produced fresh on every read and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSample {
    /// 0-23
    pub hour: u32,
    /// 0-59
    pub minute: u32,
    /// 0-59
    pub second: u32,
    /// 0-999
    pub millisecond: u32,
    /// 0-6, Sunday first
    pub weekday: u32,
    /// 1-31
    pub day: u32,
    /// 0-11, January first
    pub month: u32,
}

impl ClockSample {
    /// Build a sample from any chrono date-time.
    ///
    /// Leap seconds are folded into second 59 / millisecond 999.
    pub fn from_datetime<T: Datelike + Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second().min(59),
            millisecond: (t.nanosecond() / 1_000_000).min(999),
            weekday: t.weekday().num_days_from_sunday(),
            day: t.day(),
            month: t.month0(),
        }
    }

    /// Milliseconds elapsed since the start of the current minute
    pub fn millis_into_minute(&self) -> u32 {
        self.second * 1000 + self.millisecond
    }

    /// Fraction of the current minute elapsed, in [0, 1)
    pub fn minute_progress(&self) -> f64 {
        self.millis_into_minute() as f64 / MINUTE_MS as f64
    }
}

/// Something that can tell the current wall time.
pub trait TimeSource {
    fn sample(&self) -> ClockSample;
}

/// Local system clock.
///
/// Follows clock adjustments (NTP, DST, manual changes) without correction.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn sample(&self) -> ClockSample {
        ClockSample::from_datetime(&Local::now())
    }
}

/// Time source whose value is set by hand. Clones share the same clock.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualTimeSource(std::rc::Rc<std::cell::Cell<ClockSample>>);

#[cfg(test)]
impl ManualTimeSource {
    pub fn new(sample: ClockSample) -> Self {
        Self(std::rc::Rc::new(std::cell::Cell::new(sample)))
    }

    pub fn set(&self, sample: ClockSample) {
        self.0.set(sample);
    }
}

#[cfg(test)]
impl TimeSource for ManualTimeSource {
    fn sample(&self) -> ClockSample {
        self.0.get()
    }
}

/// Sample at the given time of day on Sunday, January 1st
#[cfg(test)]
pub fn sample_at(hour: u32, minute: u32, second: u32, millisecond: u32) -> ClockSample {
    ClockSample {
        hour,
        minute,
        second,
        millisecond,
        weekday: 0,
        day: 1,
        month: 0,
    }
}
