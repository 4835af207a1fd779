//! Screen regions of the clock face.

use ratatui::layout::{Margin, Rect};

use super::digits::{glyph_scale, glyph_size};

/// Share of the ring's width and height available to the text block
const TEXT_WIDTH_PCT: u16 = 70;
const TEXT_HEIGHT_PCT: u16 = 55;

/// Where every element of the face goes for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockLayout {
    /// Whole terminal
    pub full: Rect,
    /// Frame border, absent in fullscreen
    pub frame: Option<Rect>,
    /// Square (in screen terms) region of the seconds ring
    pub ring: Rect,
    /// `HH:MM`, sized to the glyph block
    pub digits: Rect,
    /// Date line above the digits
    pub date: Rect,
    /// Seconds and AM/PM line below the digits
    pub detail: Rect,
    /// Audio hint line at the bottom of the face
    pub hint: Rect,
    /// Controls bar, only while it is shown
    pub controls: Option<Rect>,
}

impl ClockLayout {
    pub fn compute(area: Rect, fullscreen: bool, controls_visible: bool) -> Self {
        let (frame, inner) = if fullscreen || area.width < 4 || area.height < 4 {
            (None, area)
        } else {
            (Some(area), area.inner(Margin::new(1, 1)))
        };

        // The controls row is reserved whenever fullscreen is off so the
        // face does not jump when the bar hides
        let (body, controls_row) = if fullscreen || inner.height < 2 {
            (inner, None)
        } else {
            let body = Rect {
                height: inner.height - 1,
                ..inner
            };
            let row = Rect {
                y: inner.bottom() - 1,
                height: 1,
                ..inner
            };
            (body, Some(row))
        };

        let ring = square_ring(body);
        let text = centered(
            ring,
            percent(ring.width, TEXT_WIDTH_PCT),
            percent(ring.height, TEXT_HEIGHT_PCT),
        );

        // Two text lines around the digits
        let scale = glyph_scale(text.width, text.height.saturating_sub(2));
        let (digits_width, digits_height) = glyph_size(scale);
        let digits = centered(body, digits_width, digits_height);

        let date = Rect {
            x: body.x,
            y: digits.y.saturating_sub(1).max(body.y),
            width: body.width,
            height: body.height.min(1),
        };
        let detail = Rect {
            x: body.x,
            y: digits.bottom().min(body.bottom().saturating_sub(1)),
            width: body.width,
            height: body.height.min(1),
        };
        let hint = Rect {
            x: body.x,
            y: body.bottom().saturating_sub(1),
            width: body.width,
            height: body.height.min(1),
        };

        Self {
            full: area,
            frame,
            ring,
            digits,
            date,
            detail,
            hint,
            controls: controls_row.filter(|_| controls_visible),
        }
    }

    /// Whether a click at a cell lands on the controls bar
    pub fn in_controls(&self, x: u16, y: u16) -> bool {
        self.controls
            .is_some_and(|bar| bar.contains(ratatui::layout::Position { x, y }))
    }
}

/// Largest ring that looks round with cells twice as tall as wide
fn square_ring(area: Rect) -> Rect {
    let rows = area.height.min(area.width / 2);
    centered(area, rows * 2, rows)
}

fn percent(value: u16, pct: u16) -> u16 {
    (u32::from(value) * u32::from(pct) / 100) as u16
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framed_layout_reserves_controls_row() {
        let layout = ClockLayout::compute(Rect::new(0, 0, 100, 40), false, true);

        assert_eq!(layout.frame, Some(Rect::new(0, 0, 100, 40)));
        assert_eq!(layout.controls, Some(Rect::new(1, 38, 98, 1)));
        assert_eq!(layout.ring.height, 37);
        assert_eq!(layout.ring.width, 74);
        assert!(layout.ring.bottom() <= 38);
    }

    #[test]
    fn test_hidden_controls_keep_face_in_place() {
        let shown = ClockLayout::compute(Rect::new(0, 0, 100, 40), false, true);
        let hidden = ClockLayout::compute(Rect::new(0, 0, 100, 40), false, false);

        assert_eq!(hidden.controls, None);
        assert_eq!(shown.ring, hidden.ring);
        assert_eq!(shown.digits, hidden.digits);
    }

    #[test]
    fn test_fullscreen_uses_whole_area() {
        let layout = ClockLayout::compute(Rect::new(0, 0, 100, 40), true, true);

        assert_eq!(layout.frame, None);
        assert_eq!(layout.controls, None);
        assert_eq!(layout.ring, Rect::new(10, 0, 80, 40));
    }

    #[test]
    fn test_text_lines_hug_the_digits() {
        let layout = ClockLayout::compute(Rect::new(0, 0, 120, 50), true, false);

        assert!(layout.digits.height >= 5);
        assert_eq!(layout.date.y + 1, layout.digits.y);
        assert_eq!(layout.detail.y, layout.digits.bottom());
        assert!(layout.ring.contains(ratatui::layout::Position {
            x: layout.digits.x,
            y: layout.digits.y,
        }));
    }

    #[test]
    fn test_tiny_terminal_falls_back_to_text_digits() {
        let layout = ClockLayout::compute(Rect::new(0, 0, 20, 6), false, true);

        assert_eq!((layout.digits.width, layout.digits.height), (5, 1));
        assert!(layout.full.contains(ratatui::layout::Position {
            x: layout.detail.x,
            y: layout.detail.y,
        }));
    }

    #[test]
    fn test_controls_hit_test() {
        let layout = ClockLayout::compute(Rect::new(0, 0, 100, 40), false, true);

        assert!(layout.in_controls(10, 38));
        assert!(!layout.in_controls(10, 20));
        let hidden = ClockLayout::compute(Rect::new(0, 0, 100, 40), false, false);
        assert!(!hidden.in_controls(10, 38));
    }
}
