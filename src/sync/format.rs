//! Digit and label formatting for the clock face.

use crate::clock::ClockSample;

const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Hour as shown on the face: 1-12 in 12-hour mode, 0-23 otherwise
pub fn display_hour(hour: u32, use_24h: bool) -> u32 {
    if use_24h {
        hour
    } else {
        match hour % 12 {
            0 => 12,
            h => h,
        }
    }
}

/// AM/PM from the raw 24-hour value
pub fn meridiem(hour: u32) -> &'static str {
    if hour >= 12 {
        "PM"
    } else {
        "AM"
    }
}

/// Two zero-padded decimal digits
pub fn pad2(value: u32) -> [char; 2] {
    let value = value % 100;
    [digit(value / 10), digit(value % 10)]
}

fn digit(d: u32) -> char {
    char::from_digit(d, 10).unwrap_or('0')
}

/// Time digits and the AM/PM label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeDigits {
    pub hour: [char; 2],
    pub minute: [char; 2],
    pub second: [char; 2],
    pub meridiem: &'static str,
    /// The label is only shown in 12-hour mode
    pub meridiem_visible: bool,
}

impl TimeDigits {
    pub fn from_sample(sample: &ClockSample, use_24h: bool) -> Self {
        Self {
            hour: pad2(display_hour(sample.hour, use_24h)),
            minute: pad2(sample.minute),
            second: pad2(sample.second),
            meridiem: meridiem(sample.hour),
            meridiem_visible: !use_24h,
        }
    }

    pub fn set_seconds(&mut self, second: u32) {
        self.second = pad2(second);
    }
}

impl Default for TimeDigits {
    fn default() -> Self {
        Self {
            hour: ['0', '0'],
            minute: ['0', '0'],
            second: ['0', '0'],
            meridiem: "AM",
            meridiem_visible: true,
        }
    }
}

/// Date line fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateDigits {
    pub weekday: &'static str,
    pub day: [char; 2],
    pub month: &'static str,
}

impl DateDigits {
    pub fn from_sample(sample: &ClockSample) -> Self {
        Self {
            weekday: WEEKDAYS[sample.weekday as usize % WEEKDAYS.len()],
            day: pad2(sample.day),
            month: MONTHS[sample.month as usize % MONTHS.len()],
        }
    }

    /// e.g. `TUE 05 MAR`
    pub fn label(&self) -> String {
        format!(
            "{} {}{} {}",
            self.weekday, self.day[0], self.day[1], self.month
        )
    }
}

impl Default for DateDigits {
    fn default() -> Self {
        Self {
            weekday: WEEKDAYS[0],
            day: ['0', '1'],
            month: MONTHS[0],
        }
    }
}
