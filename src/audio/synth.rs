//! Sample synthesis for the tick and the minute chime.
//!
//! Both sounds are rendered once into mono f32 buffers at [`SAMPLE_RATE`].

use std::f32::consts::{PI, TAU};

use rand::Rng;

pub const SAMPLE_RATE: u32 = 44_100;

/// Output gain applied after mixing
const MASTER_GAIN: f32 = 1.6;

/// Level the exponential ramps decay to
const FLOOR: f32 = 0.0001;

const TICK_NOISE_SECS: f32 = 0.08;
const TICK_BAND_HZ: f32 = 2200.0;
const TICK_BAND_Q: f32 = 5.0;
const TICK_TONE_HZ: f32 = 1050.0;

const CHIME_BASE_HZ: f32 = 1500.0;
const CHIME_SECS: f32 = 1.0;
const ECHO_DELAY_SECS: f32 = 0.12;
const ECHO_FEEDBACK: f32 = 0.10;

/// Chime partials as (frequency ratio, gain, decay seconds)
const CHIME_PARTIALS: [(f32, f32, f32); 4] = [
    (1.00, 0.95, 0.60),
    (1.35, 0.55, 0.52),
    (2.10, 0.35, 0.46),
    (2.90, 0.22, 0.40),
];

/// Mechanical click: a band-passed noise burst over a short triangle tone
pub fn tick_samples<R: Rng>(rng: &mut R) -> Vec<f32> {
    let len = (SAMPLE_RATE as f32 * TICK_NOISE_SECS).ceil() as usize;

    let noise: Vec<f32> = (0..len)
        .map(|i| rng.gen_range(-1.0f32..1.0) * (1.0 - i as f32 / len as f32))
        .collect();
    let mut band = BandPass::new(TICK_BAND_HZ, TICK_BAND_Q);

    noise
        .into_iter()
        .enumerate()
        .map(|(i, n)| {
            let t = i as f32 / SAMPLE_RATE as f32;

            let noise_gain = if t < 0.002 {
                linear_ramp(t, 0.0, 0.002, 0.0, 0.085)
            } else {
                exp_ramp(t, 0.002, 0.06, 0.085, FLOOR)
            };
            let tone = if t < 0.06 {
                triangle(TICK_TONE_HZ * t) * exp_ramp(t, 0.0, 0.05, 0.055, FLOOR)
            } else {
                0.0
            };

            finish(band.process(n) * noise_gain + tone)
        })
        .collect()
}

/// Bell-like chime with a short echo
pub fn chime_samples() -> Vec<f32> {
    let len = (SAMPLE_RATE as f32 * CHIME_SECS).ceil() as usize;

    let dry: Vec<f32> = (0..len)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = if t < 0.006 {
                linear_ramp(t, 0.0, 0.006, 0.0, 0.14)
            } else {
                exp_ramp(t, 0.006, 0.7, 0.14, FLOOR)
            };

            let partials: f32 = CHIME_PARTIALS
                .iter()
                .filter(|(_, _, decay)| t < decay + 0.02)
                .map(|&(ratio, gain, decay)| {
                    (TAU * CHIME_BASE_HZ * ratio * t).sin() * exp_ramp(t, 0.0, decay, gain, FLOOR)
                })
                .sum();

            partials * envelope
        })
        .collect();

    // Delay line fed by the dry signal plus its own attenuated output
    let delay = (SAMPLE_RATE as f32 * ECHO_DELAY_SECS).round() as usize;
    let mut wet = vec![0.0f32; len];
    for i in delay..len {
        wet[i] = dry[i - delay] + ECHO_FEEDBACK * wet[i - delay];
    }

    dry.iter().zip(&wet).map(|(d, w)| finish(d + w)).collect()
}

fn finish(sample: f32) -> f32 {
    (sample * MASTER_GAIN).clamp(-1.0, 1.0)
}

fn linear_ramp(t: f32, t0: f32, t1: f32, v0: f32, v1: f32) -> f32 {
    let x = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
    v0 + (v1 - v0) * x
}

/// Exponential ramp from `v0` at `t0` to `v1` at `t1`, holding `v1` after
fn exp_ramp(t: f32, t0: f32, t1: f32, v0: f32, v1: f32) -> f32 {
    let x = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
    v0 * (v1 / v0).powf(x)
}

/// Unit triangle wave for a phase given in cycles
fn triangle(cycles: f32) -> f32 {
    1.0 - 4.0 * ((cycles + 0.25).fract() - 0.5).abs()
}

/// Constant-peak band-pass biquad
struct BandPass {
    b0: f32,
    b2: f32,
    a1: f32,
    a2: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
}

impl BandPass {
    fn new(center_hz: f32, q: f32) -> Self {
        let w0 = 2.0 * PI * center_hz / SAMPLE_RATE as f32;
        let alpha = w0.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;

        Self {
            b0: alpha / a0,
            b2: -alpha / a0,
            a1: -2.0 * w0.cos() / a0,
            a2: (1.0 - alpha) / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    fn process(&mut self, x: f32) -> f32 {
        let y = self.b0 * x + self.b2 * self.x2 - self.a1 * self.y1 - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}
