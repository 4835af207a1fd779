//! Layer-based rendering of the clock face.
//!
//! Layers render in strict z-order: lower enum values render first
//! (background), higher values render last (overlays).

use ratatui::{buffer::Buffer, style::Style, widgets::Widget};

use crate::clock::RingGeometry;
use crate::state::DisplayPreferences;
use crate::sync::VisualSyncEngine;

use super::colors::BACKGROUND;
use super::digits::{DateWidget, DetailWidget, DigitsWidget};
use super::layout::ClockLayout;
use super::ring::RingWidget;
use super::ui::{AudioHint, ControlsBar, ControlsModel, FrameWidget, HelpOverlay};

/// Render layers in strict z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RenderLayer {
    /// Background fill and frame border
    Background = 0,
    /// Seconds ring with its tick marks
    Ring = 1,
    /// Hours, minutes and the seconds/AM-PM line
    Digits = 2,
    /// Date line
    Date = 3,
    /// Controls bar
    Controls = 4,
    /// Audio hint and help
    Overlays = 5,
}

impl RenderLayer {
    /// Get all layers in render order (background to foreground).
    pub const fn all() -> [RenderLayer; 6] {
        [
            RenderLayer::Background,
            RenderLayer::Ring,
            RenderLayer::Digits,
            RenderLayer::Date,
            RenderLayer::Controls,
            RenderLayer::Overlays,
        ]
    }

    pub const fn z_index(self) -> u8 {
        self as u8
    }

    pub fn renders_above(self, other: RenderLayer) -> bool {
        self.z_index() > other.z_index()
    }
}

/// Which layers are drawn this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerVisibility {
    enabled: [bool; 6],
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerVisibility {
    /// All layers enabled.
    pub fn new() -> Self {
        Self {
            enabled: [true; 6],
        }
    }

    /// Visibility implied by the preferences and the layout
    pub fn for_state(prefs: &DisplayPreferences, layout: &ClockLayout) -> Self {
        let mut visibility = Self::new();
        visibility.set_visible(RenderLayer::Ring, prefs.show_seconds);
        visibility.set_visible(RenderLayer::Date, prefs.show_date);
        visibility.set_visible(RenderLayer::Controls, layout.controls.is_some());
        visibility
    }

    pub fn is_visible(&self, layer: RenderLayer) -> bool {
        self.enabled[layer.z_index() as usize]
    }

    pub fn set_visible(&mut self, layer: RenderLayer, visible: bool) {
        self.enabled[layer.z_index() as usize] = visible;
    }
}

/// Everything the layers read for one frame.
pub struct RenderState<'a> {
    pub engine: &'a VisualSyncEngine,
    pub geometry: &'a RingGeometry,
    pub prefs: &'a DisplayPreferences,
    pub controls: &'a ControlsModel,
    /// Colon brightness from the pulse animation
    pub colon_level: f32,
    pub show_help: bool,
    /// Sound is on but unavailable
    pub audio_hint: bool,
    pub use_unicode: bool,
}

/// Draws the enabled layers in order into the regions of a layout.
pub struct LayerRenderer<'a> {
    layout: &'a ClockLayout,
    visibility: &'a LayerVisibility,
}

impl<'a> LayerRenderer<'a> {
    pub fn new(layout: &'a ClockLayout, visibility: &'a LayerVisibility) -> Self {
        Self { layout, visibility }
    }

    /// Render all layers in order.
    pub fn render_all(&self, buf: &mut Buffer, state: &RenderState<'_>) {
        for layer in RenderLayer::all() {
            if self.visibility.is_visible(layer) {
                self.render_layer(layer, buf, state);
            }
        }
    }

    fn render_layer(&self, layer: RenderLayer, buf: &mut Buffer, state: &RenderState<'_>) {
        match layer {
            RenderLayer::Background => self.render_background(buf, state),
            RenderLayer::Ring => self.render_ring(buf, state),
            RenderLayer::Digits => self.render_digits(buf, state),
            RenderLayer::Date => self.render_date(buf, state),
            RenderLayer::Controls => self.render_controls(buf, state),
            RenderLayer::Overlays => self.render_overlays(buf, state),
        }
    }

    fn render_background(&self, buf: &mut Buffer, state: &RenderState<'_>) {
        buf.set_style(self.layout.full, Style::default().bg(BACKGROUND));
        if let Some(frame) = self.layout.frame {
            FrameWidget::new(state.use_unicode).render(frame, buf);
        }
    }

    fn render_ring(&self, buf: &mut Buffer, state: &RenderState<'_>) {
        RingWidget::new(state.geometry, state.engine.ring_offset(), state.engine.marks())
            .use_unicode(state.use_unicode)
            .render(self.layout.ring, buf);
    }

    fn render_digits(&self, buf: &mut Buffer, state: &RenderState<'_>) {
        let time = state.engine.time_digits();
        DigitsWidget::new(time)
            .colon_level(state.colon_level)
            .use_unicode(state.use_unicode)
            .render(self.layout.digits, buf);
        DetailWidget::new(time, state.prefs.show_seconds).render(self.layout.detail, buf);
    }

    fn render_date(&self, buf: &mut Buffer, state: &RenderState<'_>) {
        DateWidget::new(state.engine.date_digits()).render(self.layout.date, buf);
    }

    fn render_controls(&self, buf: &mut Buffer, state: &RenderState<'_>) {
        if let Some(bar) = self.layout.controls {
            ControlsBar::new(state.controls)
                .use_unicode(state.use_unicode)
                .render(bar, buf);
        }
    }

    fn render_overlays(&self, buf: &mut Buffer, state: &RenderState<'_>) {
        if state.audio_hint {
            AudioHint.render(self.layout.hint, buf);
        }
        if state.show_help {
            HelpOverlay::new(state.use_unicode).render(self.layout.full, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::sample_at;
    use crate::render::colors::ACCENT;
    use ratatui::layout::Rect;

    fn screen_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    fn render(prefs: DisplayPreferences, controls_visible: bool, audio_hint: bool) -> Buffer {
        let geometry = RingGeometry::default();
        let mut engine = VisualSyncEngine::new(&geometry);
        engine.resync(&sample_at(9, 41, 30, 0), &prefs);

        let area = Rect::new(0, 0, 100, 40);
        let layout = ClockLayout::compute(area, false, controls_visible);
        let visibility = LayerVisibility::for_state(&prefs, &layout);
        let controls = ControlsModel::from_prefs(&prefs);
        let state = RenderState {
            engine: &engine,
            geometry: &geometry,
            prefs: &prefs,
            controls: &controls,
            colon_level: 1.0,
            show_help: false,
            audio_hint,
            use_unicode: false,
        };

        let mut buf = Buffer::empty(area);
        LayerRenderer::new(&layout, &visibility).render_all(&mut buf, &state);
        buf
    }

    #[test]
    fn test_layer_ordering() {
        assert!(RenderLayer::Background < RenderLayer::Ring);
        assert!(RenderLayer::Ring < RenderLayer::Digits);
        assert!(RenderLayer::Controls < RenderLayer::Overlays);
        assert!(RenderLayer::Overlays.renders_above(RenderLayer::Controls));
        assert!(!RenderLayer::Background.renders_above(RenderLayer::Date));
    }

    #[test]
    fn test_all_layers_in_order() {
        let layers = RenderLayer::all();
        assert_eq!(layers[0], RenderLayer::Background);
        assert_eq!(layers[5], RenderLayer::Overlays);
        for i in 1..layers.len() {
            assert!(layers[i] > layers[i - 1]);
        }
    }

    #[test]
    fn test_visibility_follows_prefs() {
        let prefs = DisplayPreferences {
            show_seconds: false,
            show_date: true,
            ..DisplayPreferences::default()
        };
        let layout = ClockLayout::compute(Rect::new(0, 0, 80, 30), true, true);
        let visibility = LayerVisibility::for_state(&prefs, &layout);

        assert!(!visibility.is_visible(RenderLayer::Ring));
        assert!(visibility.is_visible(RenderLayer::Date));
        assert!(!visibility.is_visible(RenderLayer::Controls));
        assert!(visibility.is_visible(RenderLayer::Digits));
    }

    #[test]
    fn test_full_face_renders_text() {
        let buf = render(DisplayPreferences::default(), true, false);
        let text = screen_text(&buf);

        assert!(text.contains("SUN 01 JAN"));
        assert!(text.contains("30  AM"));
        assert!(text.contains("SOUND [m]"));
        assert!(text.contains("ringclock"));
        assert!(!text.contains("sound unavailable"));
    }

    #[test]
    fn test_hidden_layers_are_not_drawn() {
        let prefs = DisplayPreferences {
            show_seconds: false,
            show_date: false,
            ..DisplayPreferences::default()
        };
        let buf = render(prefs, false, true);
        let text = screen_text(&buf);

        assert!(!text.contains("JAN"));
        assert!(!text.contains("SOUND [m]"));
        assert!(text.contains("sound unavailable"));
        assert_eq!(buf.content().iter().filter(|c| c.fg == ACCENT).count(), 0);
    }

    #[test]
    fn test_ring_uses_accent_when_shown() {
        let buf = render(DisplayPreferences::default(), false, false);
        assert!(buf.content().iter().filter(|c| c.fg == ACCENT).count() > 10);
    }
}
