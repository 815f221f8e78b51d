#![forbid(unsafe_code)]

//! Cylindrical color spaces (HSL and HSV) and their conversions to sRGB.
//!
//! Hue is expressed in degrees on `[0, 360)`; every other channel lives on
//! `[0, 1]`. Constructors normalize their inputs, so an [`Hsl`] or [`Hsv`]
//! value is always in range and can be converted back to a [`Color`]
//! without further checks.
//!
//! [`Color`]: crate::Color

/// Wrap a hue in degrees onto `[0, 360)`. Non-finite input maps to `0`.
#[must_use]
pub fn normalize_hue(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest angular distance between two hues, in degrees (`0..=180`).
#[must_use]
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let diff = (normalize_hue(a) - normalize_hue(b)).abs();
    diff.min(360.0 - diff)
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Hue / saturation / lightness.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Lightness, `[0, 1]`.
    pub l: f64,
}

impl Hsl {
    /// Build a normalized HSL triple.
    #[must_use]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: unit(s),
            l: unit(l),
        }
    }

    pub(crate) fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (r, g, b) = unit_rgb(r, g, b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Self { h: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        Self {
            h: hue_of(r, g, b, max, delta),
            s,
            l,
        }
    }

    pub(crate) fn to_unit_rgb(self) -> (f64, f64, f64) {
        if self.s == 0.0 {
            return (self.l, self.l, self.l);
        }

        let q = if self.l < 0.5 {
            self.l * (1.0 + self.s)
        } else {
            self.l + self.s - self.l * self.s
        };
        let p = 2.0 * self.l - q;
        let h = self.h / 360.0;

        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }
}

/// Hue / saturation / value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`.
    pub h: f64,
    /// Saturation, `[0, 1]`.
    pub s: f64,
    /// Value, `[0, 1]`.
    pub v: f64,
}

impl Hsv {
    /// Build a normalized HSV triple.
    #[must_use]
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self {
            h: normalize_hue(h),
            s: unit(s),
            v: unit(v),
        }
    }

    pub(crate) fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let (r, g, b) = unit_rgb(r, g, b);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let s = if max == 0.0 { 0.0 } else { delta / max };
        let h = if delta == 0.0 {
            0.0
        } else {
            hue_of(r, g, b, max, delta)
        };

        Self { h, s, v: max }
    }

    pub(crate) fn to_unit_rgb(self) -> (f64, f64, f64) {
        let sector = self.h / 60.0;
        let i = sector.floor();
        let f = sector - i;
        let p = self.v * (1.0 - self.s);
        let q = self.v * (1.0 - f * self.s);
        let t = self.v * (1.0 - (1.0 - f) * self.s);

        match (i as i64).rem_euclid(6) {
            0 => (self.v, t, p),
            1 => (q, self.v, p),
            2 => (p, self.v, t),
            3 => (p, q, self.v),
            4 => (t, p, self.v),
            _ => (self.v, p, q),
        }
    }
}

fn unit_rgb(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    (
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    )
}

fn hue_of(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    let sector = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };
    normalize_hue(sector * 60.0)
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_hue_wraps_both_directions() {
        assert_eq!(normalize_hue(370.0), 10.0);
        assert_eq!(normalize_hue(-30.0), 330.0);
        assert_eq!(normalize_hue(360.0), 0.0);
        assert_eq!(normalize_hue(f64::NAN), 0.0);
    }

    #[test]
    fn hue_distance_takes_short_way_round() {
        assert_eq!(hue_distance(350.0, 10.0), 20.0);
        assert_eq!(hue_distance(0.0, 180.0), 180.0);
        assert_eq!(hue_distance(90.0, 90.0), 0.0);
    }

    #[test]
    fn hsl_new_clamps_channels() {
        let hsl = Hsl::new(-90.0, 1.5, -0.2);
        assert_eq!(hsl.h, 270.0);
        assert_eq!(hsl.s, 1.0);
        assert_eq!(hsl.l, 0.0);
    }

    #[test]
    fn pure_red_in_both_spaces() {
        let hsl = Hsl::from_rgb(255, 0, 0);
        assert_eq!((hsl.h, hsl.s, hsl.l), (0.0, 1.0, 0.5));
        let hsv = Hsv::from_rgb(255, 0, 0);
        assert_eq!((hsv.h, hsv.s, hsv.v), (0.0, 1.0, 1.0));
    }

    #[test]
    fn grays_have_no_saturation() {
        let hsl = Hsl::from_rgb(128, 128, 128);
        assert_eq!(hsl.s, 0.0);
        assert_eq!(hsl.h, 0.0);
        let hsv = Hsv::from_rgb(0, 0, 0);
        assert_eq!(hsv.s, 0.0);
    }
}
