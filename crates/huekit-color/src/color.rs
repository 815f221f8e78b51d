#![forbid(unsafe_code)]

//! The canonical [`Color`] value.
//!
//! A [`Color`] is an opaque sRGB triple. Its textual form is always the
//! canonical `#RRGGBB` (uppercase) string, so two colors compare equal
//! exactly when their hex strings do. Parsing is the only way in from
//! untrusted text and it never lets an invalid value through.
//!
//! Channel operations (`mix`, `spin`, `lighten`, ...) follow the common
//! web conventions: amounts are percentages, HSL adjustments are additive
//! and clamped, and the result is rounded back to integer channels.

use std::fmt;
use std::str::FromStr;

use crate::space::{Hsl, Hsv};

/// Error produced when text cannot be read as a color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color: {input:?}")]
    InvalidColor { input: String },
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Create a color from its channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    #[must_use]
    pub const fn from_u32(packed: u32) -> Self {
        Self::rgb(
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
        )
    }

    #[must_use]
    pub const fn r(self) -> u8 {
        self.r
    }

    #[must_use]
    pub const fn g(self) -> u8 {
        self.g
    }

    #[must_use]
    pub const fn b(self) -> u8 {
        self.b
    }

    /// Channels as a tuple.
    #[must_use]
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (any case, surrounding
    /// whitespace ignored).
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidColor {
            input: input.to_string(),
        };

        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Self::from_u32)
                .map_err(|_| invalid()),
            3 => {
                let mut channels = [0u8; 3];
                for (slot, idx) in channels.iter_mut().zip(0..3) {
                    let nibble =
                        u8::from_str_radix(&digits[idx..=idx], 16).map_err(|_| invalid())?;
                    *slot = nibble * 17;
                }
                Ok(Self::rgb(channels[0], channels[1], channels[2]))
            }
            _ => Err(invalid()),
        }
    }

    /// Validity guard for untrusted text.
    #[must_use]
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }

    /// Parse `input`, keeping `fallback` when it is not a color.
    #[must_use]
    pub fn parse_or(input: &str, fallback: Self) -> Self {
        Self::parse(input).unwrap_or(fallback)
    }

    /// Canonical `#RRGGBB` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        Hsl::from_rgb(self.r, self.g, self.b)
    }

    #[must_use]
    pub fn from_hsl(hsl: Hsl) -> Self {
        let (r, g, b) = hsl.to_unit_rgb();
        Self::from_unit(r, g, b)
    }

    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        Hsv::from_rgb(self.r, self.g, self.b)
    }

    #[must_use]
    pub fn from_hsv(hsv: Hsv) -> Self {
        let (r, g, b) = hsv.to_unit_rgb();
        Self::from_unit(r, g, b)
    }

    /// Build a color from channels on `[0, 1]`, clamping and rounding.
    #[must_use]
    pub fn from_unit(r: f64, g: f64, b: f64) -> Self {
        Self::rgb(channel(r * 255.0), channel(g * 255.0), channel(b * 255.0))
    }

    /// Move from `self` toward `other` by `weight` percent (`0` keeps
    /// `self`, `100` yields `other`).
    #[must_use]
    pub fn mix(self, other: Self, weight: f64) -> Self {
        let p = weight.clamp(0.0, 100.0) / 100.0;
        let blend = |a: u8, b: u8| channel(f64::from(a) + (f64::from(b) - f64::from(a)) * p);
        Self::rgb(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    /// Rotate the hue by `degrees`.
    #[must_use]
    pub fn spin(self, degrees: f64) -> Self {
        let hsl = self.to_hsl();
        Self::from_hsl(Hsl::new(hsl.h + degrees, hsl.s, hsl.l))
    }

    /// The hue rotated half way round the wheel.
    #[must_use]
    pub fn complement(self) -> Self {
        self.spin(180.0)
    }

    /// Raise HSL lightness by `amount` percentage points.
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        self.with_hsl(|hsl| Hsl::new(hsl.h, hsl.s, hsl.l + amount / 100.0))
    }

    /// Lower HSL lightness by `amount` percentage points.
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        self.lighten(-amount)
    }

    /// Raise HSL saturation by `amount` percentage points.
    #[must_use]
    pub fn saturate(self, amount: f64) -> Self {
        self.with_hsl(|hsl| Hsl::new(hsl.h, hsl.s + amount / 100.0, hsl.l))
    }

    /// Lower HSL saturation by `amount` percentage points.
    #[must_use]
    pub fn desaturate(self, amount: f64) -> Self {
        self.saturate(-amount)
    }

    /// Euclidean distance in 0..=255 RGB space.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dr = f64::from(self.r) - f64::from(other.r);
        let dg = f64::from(self.g) - f64::from(other.g);
        let db = f64::from(self.b) - f64::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    fn with_hsl(self, f: impl FnOnce(Hsl) -> Hsl) -> Self {
        Self::from_hsl(f(self.to_hsl()))
    }
}

fn channel(value: f64) -> u8 {
    if value.is_finite() {
        value.round().clamp(0.0, 255.0) as u8
    } else {
        0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::rgb(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_common_forms() {
        let expected = Color::rgb(0x00, 0x9F, 0xDB);
        assert_eq!(Color::parse("#009FDB"), Ok(expected));
        assert_eq!(Color::parse("009fdb"), Ok(expected));
        assert_eq!(Color::parse("  #009fDb "), Ok(expected));
        assert_eq!(Color::parse("#abc"), Ok(Color::rgb(0xAA, 0xBB, 0xCC)));
    }

    #[test]
    fn parse_rejects_garbage() {
        for input in ["", "#", "#12345", "#1234567", "#GGGGGG", "red", "#+12345", "##123456"] {
            assert!(
                matches!(Color::parse(input), Err(ColorError::InvalidColor { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn hex_is_canonical_uppercase() {
        let color = Color::parse("#a1b2c3").unwrap();
        assert_eq!(color.to_hex(), "#A1B2C3");
        assert_eq!(color.to_string(), "#A1B2C3");
    }

    #[test]
    fn parse_or_snaps_back() {
        let fallback = Color::rgb(1, 2, 3);
        assert_eq!(Color::parse_or("nope", fallback), fallback);
        assert_eq!(Color::parse_or("#FFFFFF", fallback), Color::WHITE);
    }

    #[test]
    fn mix_endpoints_and_midpoint() {
        let a = Color::BLACK;
        let b = Color::WHITE;
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 100.0), b);
        assert_eq!(a.mix(b, 50.0), Color::rgb(128, 128, 128));
    }

    #[test]
    fn spin_rotates_hue() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.spin(120.0), Color::rgb(0, 255, 0));
        assert_eq!(red.spin(-120.0), Color::rgb(0, 0, 255));
        assert_eq!(red.complement(), Color::rgb(0, 255, 255));
    }

    #[test]
    fn lighten_and_darken_clamp() {
        let red = Color::rgb(255, 0, 0);
        assert_eq!(red.lighten(100.0), Color::WHITE);
        assert_eq!(red.darken(100.0), Color::BLACK);
        assert!(red.lighten(10.0).to_hsl().l > red.to_hsl().l);
    }

    #[test]
    fn desaturate_fully_yields_gray() {
        let color = Color::rgb(200, 40, 90).desaturate(100.0);
        assert_eq!(color.r(), color.g());
        assert_eq!(color.g(), color.b());
    }

    #[test]
    fn hsl_round_trip_for_brand_blue() {
        let blue = Color::rgb(0x00, 0x9F, 0xDB);
        assert_eq!(Color::from_hsl(blue.to_hsl()), blue);
        assert_eq!(Color::from_hsv(blue.to_hsv()), blue);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Color::rgb(0, 0, 0).distance(Color::rgb(3, 4, 0)), 5.0);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 255)).unwrap();
        assert_eq!(json, "\"#0102FF\"");
        let back: Color = serde_json::from_str("\"#0102ff\"").unwrap();
        assert_eq!(back, Color::rgb(1, 2, 255));
        assert!(serde_json::from_str::<Color>("\"#zzz\"").is_err());
    }
}
