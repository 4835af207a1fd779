use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Widget},
};

use crate::state::DisplayPreferences;

use super::colors::{ACCENT, BACKGROUND, DIGITS, MUTED, SECONDARY, WARNING};
use super::symbols::{border_set, BUTTON_OFF, BUTTON_ON};

/// Blank cells between two buttons
const BUTTON_GAP: u16 = 3;

/// One toggle on the controls bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    AmPm,
    Seconds,
    Date,
    Sound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlButton {
    pub id: ControlId,
    pub label: &'static str,
    pub key: char,
    /// Accessibility-style pressed state
    pub pressed: bool,
}

impl ControlButton {
    fn text(&self, use_unicode: bool) -> String {
        let indicator = if self.pressed { BUTTON_ON } else { BUTTON_OFF };
        format!("{} {} [{}]", indicator.render(use_unicode), self.label, self.key)
    }
}

/// State of the controls bar, derived from the preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsModel {
    buttons: [ControlButton; 4],
}

impl ControlsModel {
    pub fn from_prefs(prefs: &DisplayPreferences) -> Self {
        let button = |id, label, key, pressed| ControlButton {
            id,
            label,
            key,
            pressed,
        };
        Self {
            buttons: [
                // Pressed means 12-hour display
                button(ControlId::AmPm, "AM/PM", 'p', !prefs.use_24h),
                button(ControlId::Seconds, "SEC", 's', prefs.show_seconds),
                button(ControlId::Date, "DATE", 'd', prefs.show_date),
                button(ControlId::Sound, "SOUND", 'm', prefs.sound_on),
            ],
        }
    }

    pub fn buttons(&self) -> &[ControlButton] {
        &self.buttons
    }

    pub fn pressed(&self, id: ControlId) -> bool {
        self.buttons
            .iter()
            .find(|b| b.id == id)
            .is_some_and(|b| b.pressed)
    }

    /// Cell span of each button inside `bar`, centred as a group
    fn spans(&self, bar: Rect, use_unicode: bool) -> Vec<(ControlButton, Rect)> {
        let widths: Vec<u16> = self
            .buttons
            .iter()
            .map(|b| b.text(use_unicode).chars().count() as u16)
            .collect();
        let total = widths.iter().sum::<u16>() + BUTTON_GAP * (widths.len() as u16 - 1);

        let mut x = bar.x + bar.width.saturating_sub(total) / 2;
        self.buttons
            .iter()
            .zip(widths)
            .map(|(button, width)| {
                let span = Rect::new(x, bar.y, width, 1).intersection(bar);
                x = x.saturating_add(width + BUTTON_GAP);
                (*button, span)
            })
            .collect()
    }

    /// Button under a click, if any
    pub fn hit_test(&self, bar: Rect, x: u16, y: u16, use_unicode: bool) -> Option<ControlId> {
        self.spans(bar, use_unicode)
            .into_iter()
            .find(|(_, span)| span.contains(ratatui::layout::Position { x, y }))
            .map(|(button, _)| button.id)
    }
}

/// Controls bar along the bottom of the frame
pub struct ControlsBar<'a> {
    model: &'a ControlsModel,
    use_unicode: bool,
}

impl<'a> ControlsBar<'a> {
    pub fn new(model: &'a ControlsModel) -> Self {
        Self {
            model,
            use_unicode: true,
        }
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }
}

impl Widget for ControlsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let on_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
        let off_style = Style::default().fg(MUTED);

        for (button, span) in self.model.spans(area, self.use_unicode) {
            let style = if button.pressed { on_style } else { off_style };
            Line::styled(button.text(self.use_unicode), style).render(span, buf);
        }
    }
}

/// Border around the face when not fullscreen
pub struct FrameWidget {
    use_unicode: bool,
}

impl FrameWidget {
    pub fn new(use_unicode: bool) -> Self {
        Self { use_unicode }
    }
}

impl Widget for FrameWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::bordered()
            .border_set(border_set(self.use_unicode))
            .border_style(Style::default().fg(MUTED))
            .title(Line::styled(" ringclock ", Style::default().fg(SECONDARY)))
            .render(area, buf);
    }
}

/// Shown while sound is on but no output could be opened
pub struct AudioHint;

impl AudioHint {
    pub const TEXT: &'static str = "sound unavailable";
}

impl Widget for AudioHint {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::styled(Self::TEXT, Style::default().fg(WARNING))
            .centered()
            .render(area, buf);
    }
}

/// Help overlay widget
pub struct HelpOverlay {
    use_unicode: bool,
}

impl HelpOverlay {
    pub const BINDINGS: [(&'static str, &'static str); 8] = [
        ("f", "Toggle fullscreen"),
        ("s", "Show/hide seconds ring"),
        ("p", "12/24 hour display"),
        ("m", "Sound on/off"),
        ("d", "Show/hide date"),
        ("?, h", "Toggle this help"),
        ("q, Esc", "Quit"),
        ("dbl-click", "Toggle fullscreen"),
    ];

    pub fn new(use_unicode: bool) -> Self {
        Self { use_unicode }
    }
}

impl Widget for HelpOverlay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Help box dimensions
        let box_width = 42u16.min(area.width);
        let box_height = (Self::BINDINGS.len() as u16 + 5).min(area.height);
        let box_area = Rect::new(
            area.x + (area.width - box_width) / 2,
            area.y + (area.height - box_height) / 2,
            box_width,
            box_height,
        );

        Clear.render(box_area, buf);
        let block = Block::bordered()
            .border_set(border_set(self.use_unicode))
            .border_style(Style::default().fg(ACCENT))
            .style(Style::default().bg(BACKGROUND))
            .title(
                Line::styled(
                    " Controls ",
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )
                .centered(),
            );
        let inner = block.inner(box_area);
        block.render(box_area, buf);

        let key_style = Style::default().fg(DIGITS).add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(SECONDARY);

        let mut y = inner.y + 1;
        for (key, desc) in Self::BINDINGS {
            if y >= inner.bottom().saturating_sub(1) {
                break;
            }
            buf.set_stringn(inner.x + 2, y, key, 10, key_style);
            buf.set_stringn(
                inner.x + 13,
                y,
                desc,
                inner.width.saturating_sub(14) as usize,
                desc_style,
            );
            y += 1;
        }

        // Footer
        if inner.height > 1 {
            let footer = Rect::new(inner.x, inner.bottom() - 1, inner.width, 1);
            Line::styled("Press any key to close", Style::default().fg(MUTED))
                .centered()
                .render(footer, buf);
        }
    }
}
