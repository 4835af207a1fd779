//! Colour palette for the clock face.
//!
//! Dark background, one warm accent for everything that tracks the current
//! second, and greys for structure. Mixing happens in linear light so fades
//! between accent and dim stay even.

use palette::{LinSrgb, Mix, Srgb};
use ratatui::style::Color;

/// Terminal background behind the face
pub const BACKGROUND: Color = Color::Rgb(11, 11, 14);

/// Full ring track under the progress arc
pub const TRACK: Color = Color::Rgb(38, 38, 46);

/// Tick marks not yet reached this minute
pub const TICK_IDLE: Color = Color::Rgb(72, 72, 84);

/// Progress arc and elapsed tick marks
pub const ACCENT: Color = Color::Rgb(255, 145, 64);

/// The tick mark of the current second
pub const ACTIVE: Color = Color::Rgb(255, 236, 200);

/// Hour and minute digits
pub const DIGITS: Color = Color::Rgb(236, 236, 242);

/// Date line, seconds and AM/PM
pub const SECONDARY: Color = Color::Rgb(150, 150, 164);

/// Frame border and inactive buttons
pub const MUTED: Color = Color::Rgb(90, 90, 104);

/// Warning text, e.g. audio unavailable
pub const WARNING: Color = Color::Rgb(255, 200, 80);

/// Dim a color by a factor (0.0 = black, 1.0 = unchanged)
///
/// Non-RGB colors are returned unchanged.
pub fn dim_color(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let factor = factor.clamp(0.0, 1.0);
            Color::Rgb(
                (r as f32 * factor) as u8,
                (g as f32 * factor) as u8,
                (b as f32 * factor) as u8,
            )
        }
        other => other,
    }
}

/// Interpolate between two colors in linear light.
///
/// Named colors have no RGB value: the result snaps to whichever end is
/// closer.
pub fn lerp_color(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);

    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let a = to_linear(r1, g1, b1);
            let b = to_linear(r2, g2, b2);
            let mixed = Srgb::<f32>::from_linear(a.mix(b, t)).into_format::<u8>();
            Color::Rgb(mixed.red, mixed.green, mixed.blue)
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

fn to_linear(r: u8, g: u8, b: u8) -> LinSrgb<f32> {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dim_color_rgb() {
        assert_eq!(dim_color(Color::Rgb(100, 200, 50), 0.5), Color::Rgb(50, 100, 25));
        assert_eq!(dim_color(Color::Rgb(100, 200, 50), 1.0), Color::Rgb(100, 200, 50));
        assert_eq!(dim_color(Color::Rgb(100, 200, 50), 0.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_dim_color_non_rgb() {
        assert_eq!(dim_color(Color::Blue, 0.5), Color::Blue);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_color(ACCENT, TRACK, 0.0), ACCENT);
        assert_eq!(lerp_color(ACCENT, TRACK, 1.0), TRACK);
        assert_eq!(lerp_color(ACCENT, TRACK, 7.0), TRACK);
    }

    #[test]
    fn test_lerp_is_linear_light() {
        // Halfway in linear light is brighter than the sRGB midpoint
        let Color::Rgb(r, g, b) = lerp_color(Color::Rgb(0, 0, 0), Color::Rgb(255, 255, 255), 0.5)
        else {
            panic!("expected an RGB color");
        };
        assert!((185..=190).contains(&r));
        assert_eq!((r, r), (g, b));
    }

    #[test]
    fn test_lerp_named_colors_snap() {
        assert_eq!(lerp_color(Color::Red, Color::Blue, 0.2), Color::Red);
        assert_eq!(lerp_color(Color::Red, Color::Blue, 0.8), Color::Blue);
    }
}
