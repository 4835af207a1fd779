//! Audio playback for tick and chime triggers.
//!
//! Sinks are fire-and-forget: a call queues the sound and returns at once.
//! When no device can be opened the clock keeps running visually.

#[cfg(feature = "rodio")]
pub mod synth;

use std::io::Write;
use std::time::{Duration, Instant};

use tracing::debug;
#[cfg(feature = "rodio")]
use tracing::warn;

use crate::sync::{TriggerEvent, TriggerKind};

/// Minimum spacing between two sounds
pub const MIN_SOUND_SPACING: Duration = Duration::from_millis(280);

/// Something that can make the two clock sounds
pub trait SoundSink {
    fn play_tick(&mut self);
    fn play_chime(&mut self);
    fn is_available(&self) -> bool {
        true
    }
}

/// Drops every sound
#[derive(Debug, Default)]
pub struct NullSink;

impl SoundSink for NullSink {
    fn play_tick(&mut self) {}

    fn play_chime(&mut self) {}

    fn is_available(&self) -> bool {
        false
    }
}

/// Rings the terminal bell
#[derive(Debug, Default)]
pub struct BellSink;

impl BellSink {
    fn ring(&self) {
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}

impl SoundSink for BellSink {
    fn play_tick(&mut self) {
        self.ring();
    }

    fn play_chime(&mut self) {
        self.ring();
    }
}

/// Plays the synthesized sounds on the default output device
#[cfg(feature = "rodio")]
pub struct RodioSink {
    // Dropping the stream stops all audio
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
    rng: rand::rngs::ThreadRng,
    chime: Vec<f32>,
}

#[cfg(feature = "rodio")]
impl RodioSink {
    pub fn new() -> anyhow::Result<Self> {
        use anyhow::Context;

        let (stream, handle) =
            rodio::OutputStream::try_default().context("Failed to open audio output stream")?;

        Ok(Self {
            _stream: stream,
            handle,
            rng: rand::thread_rng(),
            chime: synth::chime_samples(),
        })
    }

    fn play(&self, samples: Vec<f32>) {
        let source = rodio::buffer::SamplesBuffer::new(1, synth::SAMPLE_RATE, samples);
        if let Err(e) = self.handle.play_raw(source) {
            warn!(error = %e, "Failed to play sound");
        }
    }
}

#[cfg(feature = "rodio")]
impl SoundSink for RodioSink {
    fn play_tick(&mut self) {
        // Fresh noise every tick
        let samples = synth::tick_samples(&mut self.rng);
        self.play(samples);
    }

    fn play_chime(&mut self) {
        self.play(self.chime.clone());
    }
}

/// Which kind of sink to open when sound is first needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioBackend {
    /// Sound device if the `rodio` feature is built in, else the bell
    Device,
    /// Terminal bell
    Bell,
    /// No sound at all
    Silent,
}

/// Consumes trigger events and routes them to a lazily opened sink
pub struct AudioEngine {
    backend: AudioBackend,
    sink: Option<Box<dyn SoundSink>>,
    last_played: Option<Instant>,
}

impl AudioEngine {
    pub fn new(backend: AudioBackend) -> Self {
        Self {
            backend,
            sink: None,
            last_played: None,
        }
    }

    /// Engine with an already opened sink
    #[cfg(test)]
    pub fn with_sink(sink: Box<dyn SoundSink>) -> Self {
        Self {
            backend: AudioBackend::Device,
            sink: Some(sink),
            last_played: None,
        }
    }

    /// Open the sink if needed. Returns whether sound can be played.
    pub fn ensure(&mut self) -> bool {
        let backend = self.backend;
        self.sink
            .get_or_insert_with(|| open_sink(backend))
            .is_available()
    }

    /// Play the sound for `event`. Returns false if it was dropped.
    pub fn play(&mut self, event: TriggerEvent, now: Instant) -> bool {
        if let Some(last) = self.last_played {
            if now.saturating_duration_since(last) < MIN_SOUND_SPACING {
                debug!(second = event.second, "Dropping sound, too close to the previous one");
                return false;
            }
        }
        if !self.ensure() {
            return false;
        }
        let Some(sink) = self.sink.as_mut() else {
            return false;
        };

        match event.kind {
            TriggerKind::Tick => sink.play_tick(),
            TriggerKind::Chime => sink.play_chime(),
        }
        self.last_played = Some(now);
        true
    }
}

fn open_sink(backend: AudioBackend) -> Box<dyn SoundSink> {
    match backend {
        AudioBackend::Device => open_device(),
        AudioBackend::Bell => Box::new(BellSink),
        AudioBackend::Silent => Box::new(NullSink),
    }
}

#[cfg(feature = "rodio")]
fn open_device() -> Box<dyn SoundSink> {
    match RodioSink::new() {
        Ok(sink) => {
            debug!("Opened audio output device");
            Box::new(sink)
        }
        Err(e) => {
            warn!(error = %e, "Audio unavailable, continuing without sound");
            Box::new(NullSink)
        }
    }
}

#[cfg(not(feature = "rodio"))]
fn open_device() -> Box<dyn SoundSink> {
    debug!("Built without audio device support, using the terminal bell");
    Box::new(BellSink)
}
