//! Deterministic airline colors

use crate::{FilterState, Route};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Color source for routes without any operator
pub const UNKNOWN_AIRLINE: &str = "unknown";

pub const DEFAULT_SATURATION: u8 = 70;
pub const DEFAULT_LIGHTNESS: u8 = 50;

/// An HSL display color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    /// Hue in degrees, `[0, 360)`
    hue: u16,
    /// Saturation in percent
    saturation: u8,
    /// Lightness in percent
    lightness: u8,
}

impl Color {
    /// Build a color; hue wraps around, saturation and lightness are capped at 100
    pub fn hsl(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue: hue % 360,
            saturation: saturation.min(100),
            lightness: lightness.min(100),
        }
    }

    #[inline]
    pub fn hue(&self) -> u16 {
        self.hue
    }

    #[inline]
    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    #[inline]
    pub fn lightness(&self) -> u8 {
        self.lightness
    }

    /// Convert to 8-bit sRGB components
    pub fn to_rgb(&self) -> [u8; 3] {
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;
        let h = f64::from(self.hue) / 60.0;

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u16 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        [channel(r), channel(g), channel(b)]
    }
}

impl fmt::Display for Color {
    /// CSS notation, e.g. `hsl(210, 70%, 50%)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Hue for an airline code, derived from its first two characters
///
/// Different codes may share a hue; the space is small.
pub fn airline_hue(code: &str) -> u16 {
    let mut chars = code.chars().map(|c| u64::from(u32::from(c)));
    let c0 = chars.next().unwrap_or(0);
    let c1 = chars.next().unwrap_or(0);
    ((c0 * 137 + c1 * 59) % 360) as u16
}

/// Display color for an airline code with the default saturation and lightness
pub fn color_for(code: &str) -> Color {
    color_for_with(code, DEFAULT_SATURATION, DEFAULT_LIGHTNESS)
}

pub fn color_for_with(code: &str, saturation: u8, lightness: u8) -> Color {
    Color::hsl(airline_hue(code), saturation, lightness)
}

/// Airline whose color a route is drawn with
///
/// The first operator that is also selected in `filter`, otherwise the first
/// operator, otherwise [`UNKNOWN_AIRLINE`].
pub fn color_source<'r>(route: &'r Route, filter: &FilterState) -> &'r str {
    let operators = route.operators();
    let selected = filter.airlines();
    if !selected.is_empty() {
        if let Some(code) = operators.iter().find(|code| selected.contains(*code)) {
            return code;
        }
    }
    operators.first().map_or(UNKNOWN_AIRLINE, String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_deterministic() {
        assert_eq!(color_for("AA"), color_for("AA"));
        assert_eq!(color_for("AA").to_string(), color_for("AA").to_string());
    }

    #[test]
    fn test_airline_hue_formula() {
        // 'A' = 65: (65 * 137 + 65 * 59) % 360 = 12740 % 360 = 140
        assert_eq!(airline_hue("AA"), 140);
        // 'B' = 66, 'A' = 65: (9042 + 3835) % 360 = 12877 % 360 = 277
        assert_eq!(airline_hue("BA"), 277);
        // Only the first two characters count
        assert_eq!(airline_hue("BAW"), airline_hue("BA"));
        assert!(airline_hue("") < 360);
        assert!(airline_hue("Z") < 360);
    }

    #[test]
    fn test_display_is_css_hsl() {
        assert_eq!(color_for("AA").to_string(), "hsl(140, 70%, 50%)");
    }

    #[test]
    fn test_to_rgb_primaries() {
        assert_eq!(Color::hsl(0, 100, 50).to_rgb(), [255, 0, 0]);
        assert_eq!(Color::hsl(120, 100, 50).to_rgb(), [0, 255, 0]);
        assert_eq!(Color::hsl(240, 100, 50).to_rgb(), [0, 0, 255]);
        assert_eq!(Color::hsl(0, 0, 100).to_rgb(), [255, 255, 255]);
        assert_eq!(Color::hsl(0, 0, 0).to_rgb(), [0, 0, 0]);
    }

    #[test]
    fn test_hsl_normalizes_inputs() {
        let color = Color::hsl(400, 150, 120);
        assert_eq!(color.hue(), 40);
        assert_eq!(color.saturation(), 100);
        assert_eq!(color.lightness(), 100);
    }

    #[test]
    fn test_color_source_prefers_selected_operator() {
        let route = Route::new("JFK", "LHR").with_operators(["AA", "BA"]);

        assert_eq!(color_source(&route, &FilterState::new()), "AA");

        let filter = FilterState::new().with_airlines(["BA"]);
        assert_eq!(color_source(&route, &filter), "BA");

        // Selected airline only codeshares: fall back to the first operator
        let filter = FilterState::new().with_airlines(["IB"]);
        assert_eq!(color_source(&route, &filter), "AA");
    }

    #[test]
    fn test_color_source_without_operators() {
        let route = Route::new("JFK", "LHR").with_codeshares(["AA"]);
        assert_eq!(color_source(&route, &FilterState::new()), UNKNOWN_AIRLINE);
    }
}
