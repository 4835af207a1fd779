use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor::{Hide, Show},
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, layout::Rect, Terminal};
use tracing::{debug, info, trace};

use crate::animation::{AnimationDriver, DriverStep, PulseAnimation, TARGET_FPS};
use crate::audio::AudioEngine;
use crate::clock::{RingGeometry, TimeSource};
use crate::input::{InputEvent, InputHandler};
use crate::render::{
    ClockLayout, ControlId, ControlsModel, LayerRenderer, LayerVisibility, RenderState,
};
use crate::state::{DisplayPreferences, PreferenceStore};
use crate::sync::{SyncOutcome, VisualSyncEngine};

/// Controls bar hides after this long without input
pub const IDLE_TIMEOUT: Duration = Duration::from_millis(1000);

/// Longest the loop sleeps before checking input again
const INPUT_LATENCY: Duration = Duration::from_millis(50);

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fps: u32,
    pub use_unicode: bool,
    /// Start as if the terminal did not have focus
    pub start_hidden: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fps: TARGET_FPS,
            use_unicode: true,
            start_hidden: false,
        }
    }
}

/// Main application state
pub struct App {
    config: AppConfig,
    prefs: DisplayPreferences,
    store: Box<dyn PreferenceStore>,
    source: Box<dyn TimeSource>,
    geometry: RingGeometry,
    engine: VisualSyncEngine,
    driver: AnimationDriver,
    pulse: PulseAnimation,
    last_pulse_update: Option<Instant>,
    audio: AudioEngine,
    input_handler: InputHandler,
    controls: ControlsModel,

    fullscreen: bool,
    show_help: bool,
    // Sound is on but no output could be opened
    audio_hint: bool,
    last_activity: Option<Instant>,

    // Layout of the last drawn frame, for mouse hit tests
    last_layout: Option<ClockLayout>,

    running: bool,
}

impl App {
    pub fn new(
        config: AppConfig,
        store: Box<dyn PreferenceStore>,
        source: Box<dyn TimeSource>,
        audio: AudioEngine,
    ) -> Self {
        let prefs = DisplayPreferences::load_from(store.as_ref());
        let geometry = RingGeometry::default();
        let engine = VisualSyncEngine::new(&geometry);

        Self {
            driver: AnimationDriver::new(config.fps),
            config,
            prefs,
            store,
            source,
            geometry,
            engine,
            pulse: PulseAnimation::default(),
            last_pulse_update: None,
            audio,
            input_handler: InputHandler::new(),
            controls: ControlsModel::from_prefs(&prefs),
            fullscreen: false,
            show_help: false,
            audio_hint: false,
            last_activity: None,
            last_layout: None,
            running: true,
        }
    }

    pub fn prefs(&self) -> &DisplayPreferences {
        &self.prefs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Initial sync and driver start
    pub fn start(&mut self, now: Instant) {
        let visible = !self.config.start_hidden;
        // With sound on, the initial resync announces the current second
        let outcome = self.driver.start(
            now,
            visible,
            &mut self.engine,
            self.source.as_ref(),
            &self.prefs,
        );
        self.apply_outcome(outcome, now);

        if self.prefs.sound_on {
            self.audio_hint = !self.audio.ensure();
        }
        self.last_activity = Some(now);

        info!(mode = ?self.driver.mode(), prefs = ?self.prefs, "Clock started");
    }

    /// Run the driver once. Returns true when a frame should be drawn.
    pub fn step(&mut self, now: Instant) -> bool {
        match self
            .driver
            .step(now, &mut self.engine, self.source.as_ref(), &self.prefs)
        {
            DriverStep::Frame(outcome) => {
                let dt = self
                    .last_pulse_update
                    .map(|last| now.saturating_duration_since(last).as_secs_f32())
                    .unwrap_or(0.0);
                self.pulse.update(dt);
                self.last_pulse_update = Some(now);
                self.apply_outcome(outcome, now);
                true
            }
            DriverStep::Background(Some(trigger)) => {
                self.audio.play(trigger, now);
                false
            }
            DriverStep::Background(None) | DriverStep::Idle => false,
        }
    }

    fn apply_outcome(&mut self, outcome: SyncOutcome, now: Instant) {
        if outcome.second_changed {
            trace!(second = ?self.engine.last_second(), "Second changed");
        }
        if outcome.digits_redrawn {
            debug!(time = ?self.engine.time_digits(), "Digits redrawn");
        }
        if outcome.pulse_resynced {
            self.pulse.restart(self.engine.pulse_phase());
            self.last_pulse_update = Some(now);
        }
        if let Some(trigger) = outcome.trigger {
            self.audio.play(trigger, now);
        }
    }

    /// Handle one input event
    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        if event.is_activity() {
            self.last_activity = Some(now);
        }

        match event {
            InputEvent::Quit => {
                self.running = false;
            }
            InputEvent::ToggleFullscreen => self.toggle_fullscreen(),
            InputEvent::ToggleSeconds => self.toggle_seconds(now),
            InputEvent::Toggle24h => self.toggle_24h(),
            InputEvent::ToggleSound => self.toggle_sound(),
            InputEvent::ToggleDate => self.toggle_date(),
            InputEvent::ToggleHelp => self.set_help(!self.show_help),
            InputEvent::CloseHelp => self.set_help(false),
            InputEvent::Visibility(visible) => self.set_visible(visible, now),
            InputEvent::Click { x, y } => self.click(x, y, now),
            InputEvent::DoubleClick { x, y } => {
                if self.in_controls(x, y) {
                    // The second click of the pair still presses the button
                    self.click(x, y, now);
                } else {
                    self.toggle_fullscreen();
                }
            }
            InputEvent::Resize { .. } | InputEvent::Activity | InputEvent::None => {}
        }
    }

    fn in_controls(&self, x: u16, y: u16) -> bool {
        self.last_layout.is_some_and(|layout| layout.in_controls(x, y))
    }

    fn click(&mut self, x: u16, y: u16, now: Instant) {
        let Some(bar) = self.last_layout.and_then(|layout| layout.controls) else {
            return;
        };
        match self.controls.hit_test(bar, x, y, self.config.use_unicode) {
            Some(ControlId::AmPm) => self.toggle_24h(),
            Some(ControlId::Seconds) => self.toggle_seconds(now),
            Some(ControlId::Date) => self.toggle_date(),
            Some(ControlId::Sound) => self.toggle_sound(),
            None => {}
        }
    }

    fn set_help(&mut self, visible: bool) {
        self.show_help = visible;
        self.input_handler.set_help_visible(visible);
    }

    fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        debug!(fullscreen = self.fullscreen, "Toggled fullscreen");
    }

    fn toggle_seconds(&mut self, now: Instant) {
        self.prefs.toggle_seconds();
        self.persist();
        // The ring must be right on the first frame it is shown again. The
        // resync announces the current second unless it already sounded.
        if self.prefs.show_seconds {
            let outcome = self.engine.resync(&self.source.sample(), &self.prefs);
            self.apply_outcome(outcome, now);
        }
    }

    fn toggle_24h(&mut self) {
        self.prefs.toggle_24h();
        self.engine.refresh_digits(&self.source.sample(), &self.prefs);
        self.persist();
    }

    fn toggle_date(&mut self) {
        self.prefs.toggle_date();
        self.persist();
    }

    fn toggle_sound(&mut self) {
        self.prefs.toggle_sound();
        self.audio_hint = self.prefs.sound_on && !self.audio.ensure();
        self.persist();
    }

    fn persist(&mut self) {
        self.prefs.save_to(self.store.as_mut());
        self.controls = ControlsModel::from_prefs(&self.prefs);
    }

    fn set_visible(&mut self, visible: bool, now: Instant) {
        if let Some(outcome) = self.driver.set_visible(
            now,
            visible,
            &mut self.engine,
            self.source.as_ref(),
            &self.prefs,
        ) {
            self.apply_outcome(outcome, now);
        }
    }

    /// Whether the controls bar is currently shown
    pub fn controls_visible(&self, now: Instant) -> bool {
        self.last_activity
            .is_some_and(|at| now.saturating_duration_since(at) < IDLE_TIMEOUT)
    }

    /// Render the clock face
    pub fn render(&mut self, area: Rect, buf: &mut Buffer, now: Instant) {
        let layout = ClockLayout::compute(area, self.fullscreen, self.controls_visible(now));
        self.last_layout = Some(layout);

        let visibility = LayerVisibility::for_state(&self.prefs, &layout);
        let state = RenderState {
            engine: &self.engine,
            geometry: &self.geometry,
            prefs: &self.prefs,
            controls: &self.controls,
            colon_level: self.pulse.value(),
            show_help: self.show_help,
            audio_hint: self.audio_hint,
            use_unicode: self.config.use_unicode,
        };

        LayerRenderer::new(&layout, &visibility).render_all(buf, &state);
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let _guard = TerminalGuard::enter()?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

        self.start(Instant::now());

        while self.running {
            // Drain pending input
            while let Some(event) = self.input_handler.poll(Duration::ZERO) {
                self.handle_event(event, Instant::now());
                if !self.running {
                    break;
                }
            }

            let now = Instant::now();
            if self.step(now) {
                terminal
                    .draw(|frame| self.render(frame.area(), frame.buffer_mut(), now))
                    .context("Failed to draw frame")?;
            }

            let wait = self.driver.time_until_next_wake(Instant::now());
            tokio::time::sleep(wait.min(INPUT_LATENCY)).await;
        }

        info!(frames = self.driver.frames().frame_count(), "Shutting down");
        Ok(())
    }
}

/// Raw mode, alternate screen, mouse capture and focus reporting for as long
/// as it lives
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        // From here on dropping the guard restores the terminal
        let guard = Self;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableFocusChange,
            Hide
        )
        .context("Failed to set up terminal")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            DisableFocusChange,
            DisableMouseCapture,
            LeaveAlternateScreen,
            Show
        );
        let _ = disable_raw_mode();
    }
}
