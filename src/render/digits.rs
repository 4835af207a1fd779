//! Block-glyph time digits, the seconds/AM-PM line and the date line.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::sync::{DateDigits, TimeDigits};

use super::colors::{lerp_color, ACCENT, BACKGROUND, DIGITS, SECONDARY};
use super::symbols::DIGIT_FILL;

/// 3x5 glyphs, one row per entry, high bit on the left
const GLYPHS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

const GLYPH_WIDTH: u16 = 3;
const GLYPH_HEIGHT: u16 = 5;

/// `HH:MM` in glyph pixels: four digits, a one pixel colon, four gaps
const FACE_PIXELS: u16 = 4 * GLYPH_WIDTH + 1 + 4;

/// Terminal cells are roughly twice as tall as wide
const CELL_ASPECT: u16 = 2;

/// Largest glyph scale that fits; zero means plain text
pub fn glyph_scale(width: u16, height: u16) -> u16 {
    (width / (FACE_PIXELS * CELL_ASPECT)).min(height / GLYPH_HEIGHT)
}

/// Size in cells of `HH:MM` at a scale
pub fn glyph_size(scale: u16) -> (u16, u16) {
    if scale == 0 {
        (5, 1)
    } else {
        (FACE_PIXELS * CELL_ASPECT * scale, GLYPH_HEIGHT * scale)
    }
}

/// One column of the face: a digit or the colon
#[derive(Debug, Clone, Copy)]
enum Part {
    Digit(char),
    Colon,
}

impl Part {
    fn width(self) -> u16 {
        match self {
            Part::Digit(_) => GLYPH_WIDTH,
            Part::Colon => 1,
        }
    }

    fn lit(self, px: u16, py: u16) -> bool {
        match self {
            Part::Digit(c) => c
                .to_digit(10)
                .map(|d| GLYPHS[d as usize][py as usize] & (0b100u8 >> px) != 0)
                .unwrap_or(false),
            Part::Colon => py == 1 || py == 3,
        }
    }
}

/// Hours and minutes with a pulsing colon
pub struct DigitsWidget<'a> {
    digits: &'a TimeDigits,
    colon_level: f32,
    use_unicode: bool,
}

impl<'a> DigitsWidget<'a> {
    pub fn new(digits: &'a TimeDigits) -> Self {
        Self {
            digits,
            colon_level: 1.0,
            use_unicode: true,
        }
    }

    /// Colon brightness from the pulse, 0.0 (background) to 1.0
    pub fn colon_level(mut self, level: f32) -> Self {
        self.colon_level = level;
        self
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }

    fn colon_color(&self) -> Color {
        lerp_color(BACKGROUND, DIGITS, self.colon_level)
    }

    fn parts(&self) -> [Part; 5] {
        let [h1, h2] = self.digits.hour;
        let [m1, m2] = self.digits.minute;
        [
            Part::Digit(h1),
            Part::Digit(h2),
            Part::Colon,
            Part::Digit(m1),
            Part::Digit(m2),
        ]
    }

    fn render_text(&self, area: Rect, buf: &mut Buffer) {
        let digit_style = Style::default().fg(DIGITS).add_modifier(Modifier::BOLD);
        let [h1, h2] = self.digits.hour;
        let [m1, m2] = self.digits.minute;

        Line::from(vec![
            Span::styled(format!("{h1}{h2}"), digit_style),
            Span::styled(":", Style::default().fg(self.colon_color())),
            Span::styled(format!("{m1}{m2}"), digit_style),
        ])
        .centered()
        .render(area, buf);
    }
}

impl Widget for DigitsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let scale = glyph_scale(area.width, area.height);
        if scale == 0 {
            self.render_text(area, buf);
            return;
        }

        let (width, height) = glyph_size(scale);
        let origin_x = area.x + (area.width - width) / 2;
        let origin_y = area.y + (area.height - height) / 2;
        let fill = DIGIT_FILL.render(self.use_unicode);
        let digit_style = Style::default().fg(DIGITS);
        let colon_style = Style::default().fg(self.colon_color());

        let mut px_left = 0u16;
        for part in self.parts() {
            let style = match part {
                Part::Digit(_) => digit_style,
                Part::Colon => colon_style,
            };

            for py in 0..GLYPH_HEIGHT {
                for px in 0..part.width() {
                    if !part.lit(px, py) {
                        continue;
                    }
                    let x0 = origin_x + (px_left + px) * CELL_ASPECT * scale;
                    let y0 = origin_y + py * scale;
                    for y in y0..y0 + scale {
                        for x in x0..x0 + CELL_ASPECT * scale {
                            if let Some(cell) = buf.cell_mut((x, y)) {
                                cell.set_char(fill).set_style(style);
                            }
                        }
                    }
                }
            }

            px_left += part.width() + 1;
        }
    }
}

/// Small line under the digits: seconds and the AM/PM label
pub struct DetailWidget<'a> {
    digits: &'a TimeDigits,
    show_seconds: bool,
}

impl<'a> DetailWidget<'a> {
    pub fn new(digits: &'a TimeDigits, show_seconds: bool) -> Self {
        Self {
            digits,
            show_seconds,
        }
    }
}

impl Widget for DetailWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        if self.show_seconds {
            let [s1, s2] = self.digits.second;
            spans.push(Span::styled(
                format!("{s1}{s2}"),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ));
        }
        if self.digits.meridiem_visible {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                self.digits.meridiem,
                Style::default().fg(SECONDARY),
            ));
        }

        if !spans.is_empty() {
            Line::from(spans).centered().render(area, buf);
        }
    }
}

/// `TUE 05 MAR`
pub struct DateWidget<'a> {
    date: &'a DateDigits,
}

impl<'a> DateWidget<'a> {
    pub fn new(date: &'a DateDigits) -> Self {
        Self { date }
    }
}

impl Widget for DateWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::styled(self.date.label(), Style::default().fg(SECONDARY))
            .centered()
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(hour: [char; 2], minute: [char; 2]) -> TimeDigits {
        TimeDigits {
            hour,
            minute,
            ..TimeDigits::default()
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_glyph_scale() {
        assert_eq!(glyph_scale(34, 5), 1);
        assert_eq!(glyph_scale(67, 10), 1);
        assert_eq!(glyph_scale(68, 10), 2);
        assert_eq!(glyph_scale(68, 9), 1);
        assert_eq!(glyph_scale(20, 5), 0);
        assert_eq!(glyph_size(0), (5, 1));
        assert_eq!(glyph_size(2), (68, 10));
    }

    #[test]
    fn test_every_digit_has_a_glyph() {
        for d in '0'..='9' {
            let part = Part::Digit(d);
            let lit = (0..GLYPH_HEIGHT)
                .flat_map(|py| (0..GLYPH_WIDTH).map(move |px| (px, py)))
                .filter(|&(px, py)| part.lit(px, py))
                .count();
            assert!(lit >= 5, "digit {d} has only {lit} lit pixels");
        }
    }

    #[test]
    fn test_small_area_falls_back_to_text() {
        let time = digits(['0', '9'], ['4', '1']);
        let area = Rect::new(0, 0, 11, 1);
        let mut buf = Buffer::empty(area);
        DigitsWidget::new(&time).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "   09:41   ");
    }

    #[test]
    fn test_block_glyphs() {
        let time = digits(['1', '0'], ['0', '0']);
        let area = Rect::new(0, 0, 34, 5);
        let mut buf = Buffer::empty(area);
        DigitsWidget::new(&time).use_unicode(false).render(area, &mut buf);

        // Top row of "1" is 010: only the middle pixel is lit
        assert_eq!(buf[(0, 0)].symbol(), " ");
        assert_eq!(buf[(2, 0)].symbol(), "#");
        assert_eq!(buf[(3, 0)].symbol(), "#");
        assert_eq!(buf[(4, 0)].symbol(), " ");
        // Colon column is pixel 8, lit on rows 1 and 3
        assert_eq!(buf[(16, 1)].symbol(), "#");
        assert_eq!(buf[(16, 2)].symbol(), " ");
        assert_eq!(buf[(16, 3)].symbol(), "#");
    }

    #[test]
    fn test_colon_follows_pulse_level() {
        let time = digits(['1', '2'], ['3', '4']);
        let area = Rect::new(0, 0, 34, 5);

        let mut bright = Buffer::empty(area);
        DigitsWidget::new(&time).colon_level(1.0).render(area, &mut bright);
        assert_eq!(bright[(16, 1)].fg, DIGITS);

        let mut dim = Buffer::empty(area);
        DigitsWidget::new(&time).colon_level(0.35).render(area, &mut dim);
        assert_ne!(dim[(16, 1)].fg, DIGITS);
        // Digits themselves do not pulse
        assert_eq!(dim[(2, 0)].fg, DIGITS);
    }

    #[test]
    fn test_detail_line() {
        let time = TimeDigits {
            second: ['0', '7'],
            meridiem: "PM",
            meridiem_visible: true,
            ..TimeDigits::default()
        };
        let area = Rect::new(0, 0, 10, 1);

        let mut buf = Buffer::empty(area);
        DetailWidget::new(&time, true).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), "  07  PM  ");

        let mut buf = Buffer::empty(area);
        DetailWidget::new(&time, false).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "PM");

        let hidden = TimeDigits {
            meridiem_visible: false,
            ..time
        };
        let mut buf = Buffer::empty(area);
        DetailWidget::new(&hidden, false).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0).trim(), "");
    }

    #[test]
    fn test_date_line() {
        let date = DateDigits {
            weekday: "TUE",
            day: ['0', '5'],
            month: "MAR",
        };
        let area = Rect::new(0, 0, 14, 1);
        let mut buf = Buffer::empty(area);
        DateWidget::new(&date).render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), "  TUE 05 MAR  ");
    }
}
