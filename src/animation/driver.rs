//! Two-state scheduler feeding the sync engine.
//!
//! Foreground: one engine `tick` per paced frame while the clock is visible.
//! Background: a 250 ms sampler that only evaluates sound triggers while the
//! clock is hidden. Exactly one of the two runs at a time.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::clock::TimeSource;
use crate::state::DisplayPreferences;
use crate::sync::{SyncOutcome, TriggerEvent, VisualSyncEngine};

use super::AnimationLoop;

/// Period of the background sampler
pub const BACKGROUND_PERIOD: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverMode {
    Foreground,
    Background,
}

/// Result of one scheduling turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStep {
    /// A frame was processed and should be drawn
    Frame(SyncOutcome),
    /// The background sampler ran
    Background(Option<TriggerEvent>),
    /// Nothing was due
    Idle,
}

#[derive(Debug, Clone, Default)]
struct BackgroundSampler {
    running: bool,
    last_poll: Option<Instant>,
    last_observed: Option<u32>,
}

impl BackgroundSampler {
    fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.last_poll = Some(now);
    }

    fn stop(&mut self) {
        self.running = false;
        self.last_poll = None;
    }

    fn is_due(&self, now: Instant) -> bool {
        self.running
            && self
                .last_poll
                .map_or(true, |last| now.saturating_duration_since(last) >= BACKGROUND_PERIOD)
    }

    fn time_until_due(&self, now: Instant) -> Duration {
        self.last_poll
            .map_or(Duration::ZERO, |last| {
                BACKGROUND_PERIOD.saturating_sub(now.saturating_duration_since(last))
            })
    }
}

#[derive(Debug, Clone)]
pub struct AnimationDriver {
    mode: DriverMode,
    frames: AnimationLoop,
    background: BackgroundSampler,
}

impl AnimationDriver {
    pub fn new(target_fps: u32) -> Self {
        Self {
            mode: DriverMode::Foreground,
            frames: AnimationLoop::new(target_fps),
            background: BackgroundSampler::default(),
        }
    }

    pub fn mode(&self) -> DriverMode {
        self.mode
    }

    pub fn frames(&self) -> &AnimationLoop {
        &self.frames
    }

    /// Initial full resync, then enter the mode matching `visible`
    pub fn start(
        &mut self,
        now: Instant,
        visible: bool,
        engine: &mut VisualSyncEngine,
        source: &dyn TimeSource,
        prefs: &DisplayPreferences,
    ) -> SyncOutcome {
        let outcome = engine.resync(&source.sample(), prefs);
        if visible {
            self.mode = DriverMode::Foreground;
            self.frames.reset();
        } else {
            self.mode = DriverMode::Background;
            self.background.start(now);
        }
        debug!(mode = ?self.mode, "Animation driver started");
        outcome
    }

    /// React to a visibility change.
    ///
    /// Becoming visible stops the background sampler, resyncs the engine and
    /// resumes frames, in that order. Returns the resync outcome.
    pub fn set_visible(
        &mut self,
        now: Instant,
        visible: bool,
        engine: &mut VisualSyncEngine,
        source: &dyn TimeSource,
        prefs: &DisplayPreferences,
    ) -> Option<SyncOutcome> {
        match (self.mode, visible) {
            (DriverMode::Background, true) => {
                self.background.stop();
                let outcome = engine.resync(&source.sample(), prefs);
                self.frames.reset();
                self.mode = DriverMode::Foreground;
                debug!("Switched to foreground");
                Some(outcome)
            }
            (DriverMode::Foreground, false) => {
                self.background.start(now);
                self.mode = DriverMode::Background;
                debug!("Switched to background");
                None
            }
            _ => None,
        }
    }

    /// Run whatever is due at `now`
    pub fn step(
        &mut self,
        now: Instant,
        engine: &mut VisualSyncEngine,
        source: &dyn TimeSource,
        prefs: &DisplayPreferences,
    ) -> DriverStep {
        match self.mode {
            DriverMode::Foreground => {
                if !self.frames.should_render(now) {
                    return DriverStep::Idle;
                }
                let outcome = engine.tick(&source.sample(), prefs);
                self.frames.frame_rendered(now);
                DriverStep::Frame(outcome)
            }
            DriverMode::Background => {
                if !self.background.is_due(now) {
                    return DriverStep::Idle;
                }
                self.background.last_poll = Some(now);

                let second = source.sample().second;
                if self.background.last_observed == Some(second) {
                    return DriverStep::Background(None);
                }
                self.background.last_observed = Some(second);
                DriverStep::Background(engine.background_tick(second, prefs))
            }
        }
    }

    /// How long the run loop may sleep before something is due
    pub fn time_until_next_wake(&self, now: Instant) -> Duration {
        match self.mode {
            DriverMode::Foreground => self.frames.time_until_next_frame(now),
            DriverMode::Background => self.background.time_until_due(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{sample_at, ManualTimeSource, RingGeometry};

    struct Rig {
        driver: AnimationDriver,
        engine: VisualSyncEngine,
        source: ManualTimeSource,
        prefs: DisplayPreferences,
        now: Instant,
    }

    impl Rig {
        fn new(visible: bool) -> Self {
            let mut rig = Self {
                driver: AnimationDriver::new(60),
                engine: VisualSyncEngine::new(&RingGeometry::default()),
                source: ManualTimeSource::new(sample_at(12, 0, 0, 0)),
                prefs: DisplayPreferences {
                    sound_on: true,
                    ..DisplayPreferences::default()
                },
                now: Instant::now(),
            };
            rig.driver
                .start(rig.now, visible, &mut rig.engine, &rig.source, &rig.prefs);
            rig
        }

        fn advance(&mut self, ms: u64, second: u32, millisecond: u32) -> DriverStep {
            self.now += Duration::from_millis(ms);
            self.source.set(sample_at(12, 0, second, millisecond));
            self.driver
                .step(self.now, &mut self.engine, &self.source, &self.prefs)
        }

        fn set_visible(&mut self, visible: bool) -> Option<SyncOutcome> {
            self.driver
                .set_visible(self.now, visible, &mut self.engine, &self.source, &self.prefs)
        }
    }

    #[test]
    fn test_start_visible_runs_frames() {
        let mut rig = Rig::new(true);
        assert_eq!(rig.driver.mode(), DriverMode::Foreground);
        assert!(matches!(rig.advance(0, 0, 10), DriverStep::Frame(_)));
        assert_eq!(rig.advance(1, 0, 11), DriverStep::Idle);
    }

    #[test]
    fn test_start_hidden_runs_background() {
        let mut rig = Rig::new(false);
        assert_eq!(rig.driver.mode(), DriverMode::Background);
        assert_eq!(rig.advance(100, 0, 100), DriverStep::Idle);
        // Second 0 was already announced by the startup resync
        assert_eq!(rig.advance(150, 0, 250), DriverStep::Background(None));
    }

    #[test]
    fn test_background_emits_once_per_second() {
        let mut rig = Rig::new(true);
        rig.set_visible(false);

        let first = rig.advance(250, 1, 0);
        assert_eq!(first, DriverStep::Background(Some(TriggerEvent::for_second(1))));
        assert_eq!(rig.advance(250, 1, 250), DriverStep::Background(None));
        assert_eq!(rig.advance(250, 1, 500), DriverStep::Background(None));
        assert_eq!(
            rig.advance(250, 2, 0),
            DriverStep::Background(Some(TriggerEvent::for_second(2)))
        );
    }

    #[test]
    fn test_background_does_not_touch_visuals() {
        let mut rig = Rig::new(true);
        rig.set_visible(false);
        rig.advance(250, 5, 0);

        assert!(!rig.engine.mark(5).elapsed);
        assert!(rig.engine.mark(0).active);
    }

    #[test]
    fn test_return_to_foreground_resyncs_without_duplicate() {
        let mut rig = Rig::new(true);
        rig.set_visible(false);
        assert!(matches!(rig.advance(250, 7, 100), DriverStep::Background(Some(_))));

        rig.source.set(sample_at(12, 0, 7, 400));
        let outcome = rig.set_visible(true).unwrap();

        assert_eq!(rig.driver.mode(), DriverMode::Foreground);
        assert_eq!(outcome.trigger, None);
        assert!(rig.engine.mark(7).active);
        assert!(rig.engine.mark(6).elapsed && !rig.engine.mark(8).elapsed);

        match rig.advance(0, 7, 420) {
            DriverStep::Frame(outcome) => assert_eq!(outcome.trigger, None),
            other => panic!("expected a frame, got {other:?}"),
        }
    }

    #[test]
    fn test_return_to_foreground_catches_unsampled_second() {
        let mut rig = Rig::new(true);
        rig.set_visible(false);
        rig.advance(250, 7, 100);

        rig.source.set(sample_at(12, 0, 8, 50));
        let outcome = rig.set_visible(true).unwrap();
        assert_eq!(outcome.trigger, Some(TriggerEvent::for_second(8)));
    }

    #[test]
    fn test_redundant_visibility_changes_are_ignored() {
        let mut rig = Rig::new(true);
        assert_eq!(rig.set_visible(true), None);
        assert_eq!(rig.driver.mode(), DriverMode::Foreground);

        rig.set_visible(false);
        assert_eq!(rig.set_visible(false), None);
        assert_eq!(rig.driver.mode(), DriverMode::Background);
    }

    #[test]
    fn test_wake_time_follows_mode() {
        let mut rig = Rig::new(true);
        rig.advance(0, 0, 0);
        // One frame at 60 fps
        assert!(rig.driver.time_until_next_wake(rig.now) <= Duration::from_micros(16_666));

        rig.set_visible(false);
        assert_eq!(rig.driver.time_until_next_wake(rig.now), BACKGROUND_PERIOD);
    }
}
