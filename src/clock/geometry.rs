//! Static geometry of the seconds ring.
//!
//! All coordinates live in a 100x100 view box with y growing downward and the
//! ring centred at (50, 50). Slot 0 points straight up and slots advance
//! clockwise.

use std::f64::consts::{FRAC_PI_2, TAU};

/// Number of tick marks around the ring
pub const TICK_COUNT: usize = 60;

/// Ring radius in view-box units
pub const RING_RADIUS: f64 = 45.0;

/// Centre of the view box
pub const RING_CENTER: f64 = 50.0;

const LONG_MARK: f64 = 4.4;
const SHORT_MARK: f64 = 2.2;
const MAJOR_WEIGHT: f64 = 0.9;
const MINOR_WEIGHT: f64 = 0.6;

/// One tick mark, a radial line segment from the inner radius to the ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSegment {
    pub index: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Stroke weight (heavier on every fifth slot)
    pub weight: f64,
    pub major: bool,
}

impl TickSegment {
    /// Stroke weight relative to a major mark, in (0, 1]
    pub fn emphasis(&self) -> f32 {
        (self.weight / MAJOR_WEIGHT) as f32
    }
}

/// Ring geometry, computed once at startup
#[derive(Debug, Clone)]
pub struct RingGeometry {
    radius: f64,
    circumference: f64,
    ticks: Vec<TickSegment>,
}

impl RingGeometry {
    pub fn new(radius: f64) -> Self {
        let ticks = (0..TICK_COUNT)
            .map(|i| {
                let angle = slot_angle(i);
                let major = i % 5 == 0;
                let len = if major { LONG_MARK } else { SHORT_MARK };
                let inner = radius - len;

                TickSegment {
                    index: i,
                    x1: RING_CENTER + inner * angle.cos(),
                    y1: RING_CENTER + inner * angle.sin(),
                    x2: RING_CENTER + radius * angle.cos(),
                    y2: RING_CENTER + radius * angle.sin(),
                    weight: if major { MAJOR_WEIGHT } else { MINOR_WEIGHT },
                    major,
                }
            })
            .collect();

        Self {
            radius,
            circumference: TAU * radius,
            ticks,
        }
    }

    /// Full ring length, also the dash-array size of the progress stroke
    pub fn circumference(&self) -> f64 {
        self.circumference
    }

    pub fn ticks(&self) -> &[TickSegment] {
        &self.ticks
    }

    /// Points along the progress arc for a given dash offset.
    ///
    /// The visible stroke is `circumference - offset` long, starting at 12
    /// o'clock. `step` is the spacing between points in view-box units.
    pub fn arc_points(&self, offset: f64, step: f64) -> Vec<(f64, f64)> {
        let visible = (self.circumference - offset).clamp(0.0, self.circumference);
        if visible <= 0.0 || step <= 0.0 {
            return Vec::new();
        }

        let count = (visible / step).ceil() as usize;
        (0..=count)
            .map(|i| {
                let along = (i as f64 * step).min(visible);
                let angle = along / self.radius - FRAC_PI_2;
                (
                    RING_CENTER + self.radius * angle.cos(),
                    RING_CENTER + self.radius * angle.sin(),
                )
            })
            .collect()
    }
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self::new(RING_RADIUS)
    }
}

/// Angle of slot `i`, measured clockwise from 12 o'clock in screen space
fn slot_angle(i: usize) -> f64 {
    (i as f64 / TICK_COUNT as f64) * TAU - FRAC_PI_2
}
