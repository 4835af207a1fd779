//! Seconds ring: track, 60 tick marks and the progress arc.
//!
//! The geometry is in a 100x100 view box with y pointing down. The canvas
//! has y pointing up, so every y is flipped on the way in.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Widget,
    },
};

use crate::clock::geometry::TickSegment;
use crate::clock::{RingGeometry, TICK_COUNT};
use crate::sync::TickMark;

use super::colors::{dim_color, ACCENT, ACTIVE, BACKGROUND, TICK_IDLE, TRACK};
use super::symbols::{RING_ARC, RING_TRACK, TICK, TICK_ACTIVE, TICK_MAJOR};

const VIEW_BOX: f64 = 100.0;

/// Minor marks are drawn lighter than the five-second marks; the current
/// second is always at full brightness.
fn tick_color(mark: TickMark, tick: &TickSegment) -> Color {
    if mark.active {
        ACTIVE
    } else if mark.elapsed {
        dim_color(ACCENT, tick.emphasis())
    } else {
        dim_color(TICK_IDLE, tick.emphasis())
    }
}

fn flip(points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    points.into_iter().map(|(x, y)| (x, VIEW_BOX - y)).collect()
}

pub struct RingWidget<'a> {
    geometry: &'a RingGeometry,
    ring_offset: f64,
    marks: &'a [TickMark; TICK_COUNT],
    use_unicode: bool,
}

impl<'a> RingWidget<'a> {
    pub fn new(
        geometry: &'a RingGeometry,
        ring_offset: f64,
        marks: &'a [TickMark; TICK_COUNT],
    ) -> Self {
        Self {
            geometry,
            ring_offset,
            marks,
            use_unicode: true,
        }
    }

    pub fn use_unicode(mut self, use_unicode: bool) -> Self {
        self.use_unicode = use_unicode;
        self
    }

    /// Braille canvas, one layer each for track, ticks and arc
    fn render_canvas(&self, area: Rect, buf: &mut Buffer) {
        // About two samples per braille dot across the ring
        let step = VIEW_BOX / (4.0 * f64::from(area.width.max(1)));
        let track = flip(self.geometry.arc_points(0.0, step));
        let arc = flip(self.geometry.arc_points(self.ring_offset, step));

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, VIEW_BOX])
            .y_bounds([0.0, VIEW_BOX])
            .background_color(BACKGROUND)
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &track,
                    color: TRACK,
                });
                ctx.layer();

                for tick in self.geometry.ticks() {
                    ctx.draw(&CanvasLine::new(
                        tick.x1,
                        VIEW_BOX - tick.y1,
                        tick.x2,
                        VIEW_BOX - tick.y2,
                        tick_color(self.marks[tick.index], tick),
                    ));
                }
                ctx.layer();

                ctx.draw(&Points {
                    coords: &arc,
                    color: ACCENT,
                });
            })
            .render(area, buf);
    }

    /// One character per cell for terminals without braille
    fn render_cells(&self, area: Rect, buf: &mut Buffer) {
        let step = VIEW_BOX / (2.0 * f64::from(area.width.max(1)));
        let mut plot = |x: f64, y: f64, ch: char, color: Color| {
            let cx = area.x + ((x / VIEW_BOX) * f64::from(area.width)) as u16;
            let cy = area.y + ((y / VIEW_BOX) * f64::from(area.height)) as u16;
            if cx < area.right() && cy < area.bottom() {
                if let Some(cell) = buf.cell_mut((cx, cy)) {
                    cell.set_char(ch).set_style(Style::default().fg(color).bg(BACKGROUND));
                }
            }
        };

        for (x, y) in self.geometry.arc_points(0.0, step) {
            plot(x, y, RING_TRACK.ascii, TRACK);
        }
        for tick in self.geometry.ticks() {
            let mark = self.marks[tick.index];
            let symbol = match (mark.active, tick.major) {
                (true, _) => TICK_ACTIVE,
                (false, true) => TICK_MAJOR,
                (false, false) => TICK,
            };
            plot(tick.x1, tick.y1, symbol.ascii, tick_color(mark, tick));
        }
        for (x, y) in self.geometry.arc_points(self.ring_offset, step) {
            plot(x, y, RING_ARC.ascii, ACCENT);
        }
    }
}

impl Widget for RingWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if self.use_unicode {
            self.render_canvas(area, buf);
        } else {
            self.render_cells(area, buf);
        }
    }
}
