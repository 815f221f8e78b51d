//! Composable hue / saturation / brightness / temperature adjustments.

use huekit_color::Color;
use serde::{Deserialize, Serialize};

/// Reference a positive temperature mixes toward.
pub const WARM_REFERENCE: Color = Color::from_u32(0xFF8C00);
/// Reference a negative temperature mixes toward.
pub const COOL_REFERENCE: Color = Color::from_u32(0x0077FF);

pub const HUE_RANGE: (i32, i32) = (-180, 180);
pub const PERCENT_RANGE: (i32, i32) = (-100, 100);

/// Live adjustment parameters. The default is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// Hue rotation in degrees, `-180..=180`.
    pub hue: i32,
    /// Saturation delta in percentage points, `-100..=100`.
    pub saturation: i32,
    /// Lightness delta in percentage points, `-100..=100`.
    pub brightness: i32,
    /// Warm (positive) or cool (negative) shift, `-100..=100`.
    pub temperature: i32,
}

impl Adjustments {
    pub const IDENTITY: Self = Self {
        hue: 0,
        saturation: 0,
        brightness: 0,
        temperature: 0,
    };

    /// Build parameters, clamping each onto its range.
    #[must_use]
    pub fn new(hue: i32, saturation: i32, brightness: i32, temperature: i32) -> Self {
        Self {
            hue,
            saturation,
            brightness,
            temperature,
        }
        .clamped()
    }

    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            hue: self.hue.clamp(HUE_RANGE.0, HUE_RANGE.1),
            saturation: self.saturation.clamp(PERCENT_RANGE.0, PERCENT_RANGE.1),
            brightness: self.brightness.clamp(PERCENT_RANGE.0, PERCENT_RANGE.1),
            temperature: self.temperature.clamp(PERCENT_RANGE.0, PERCENT_RANGE.1),
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Apply to one color: spin, then saturation, then brightness, then temperature.
    #[must_use]
    pub fn apply(&self, color: Color) -> Color {
        let params = self.clamped();
        if params.is_identity() {
            return color;
        }

        let mut out = color;
        if params.hue != 0 {
            out = out.spin(f64::from(params.hue));
        }
        if params.saturation != 0 {
            let amount = f64::from(params.saturation);
            out = if amount > 0.0 {
                out.saturate(amount)
            } else {
                out.desaturate(-amount)
            };
        }
        if params.brightness != 0 {
            let amount = f64::from(params.brightness);
            out = if amount > 0.0 {
                out.lighten(amount)
            } else {
                out.darken(-amount)
            };
        }
        if params.temperature != 0 {
            let reference = if params.temperature > 0 {
                WARM_REFERENCE
            } else {
                COOL_REFERENCE
            };
            out = out.mix(reference, f64::from(params.temperature.abs()) / 2.0);
        }
        out
    }

    /// Apply to every color of `palette` except those `is_locked` accepts.
    pub fn apply_palette(
        &self,
        palette: &[Color],
        is_locked: impl Fn(&Color) -> bool,
    ) -> Vec<Color> {
        palette
            .iter()
            .map(|c| if is_locked(c) { *c } else { self.apply(*c) })
            .collect()
    }
}

/// Free-function form of [`Adjustments::apply`].
#[must_use]
pub fn apply_adjustments(color: Color, adjustments: &Adjustments) -> Color {
    adjustments.apply(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_returns_input() {
        let color = Color::from_u32(0x123456);
        assert_eq!(Adjustments::default().apply(color), color);
        assert!(Adjustments::default().is_identity());
    }

    #[test]
    fn new_clamps_out_of_range_values() {
        let params = Adjustments::new(400, -250, 101, -101);
        assert_eq!(params, Adjustments::new(180, -100, 100, -100));
    }

    #[test]
    fn hue_spins() {
        let red = Color::from_u32(0xFF0000);
        let params = Adjustments {
            hue: 120,
            ..Adjustments::default()
        };
        assert_eq!(params.apply(red), Color::from_u32(0x00FF00));
    }

    #[test]
    fn full_desaturation_yields_gray() {
        let params = Adjustments {
            saturation: -100,
            ..Adjustments::default()
        };
        let out = params.apply(Color::from_u32(0x3366CC));
        assert_eq!(out.r(), out.g());
        assert_eq!(out.g(), out.b());
    }

    #[test]
    fn brightness_sign_controls_direction() {
        let base = Color::from_u32(0x3366CC);
        let lighter = Adjustments::new(0, 0, 20, 0).apply(base);
        let darker = Adjustments::new(0, 0, -20, 0).apply(base);
        assert!(lighter.to_hsl().l > base.to_hsl().l);
        assert!(darker.to_hsl().l < base.to_hsl().l);
    }

    #[test]
    fn temperature_mixes_toward_references() {
        let gray = Color::from_u32(0x808080);
        let warm = Adjustments::new(0, 0, 0, 100).apply(gray);
        assert_eq!(warm, gray.mix(WARM_REFERENCE, 50.0));
        let cool = Adjustments::new(0, 0, 0, -40).apply(gray);
        assert_eq!(cool, gray.mix(COOL_REFERENCE, 20.0));
        assert!(warm.r() > warm.b());
        assert!(cool.b() > cool.r());
    }

    #[test]
    fn apply_palette_skips_locked() {
        let palette = [Color::from_u32(0xFF0000), Color::from_u32(0x00FF00)];
        let params = Adjustments::new(60, 0, 0, 0);
        let out = params.apply_palette(&palette, |c| *c == palette[0]);
        assert_eq!(out[0], palette[0]);
        assert_ne!(out[1], palette[1]);
    }
}
