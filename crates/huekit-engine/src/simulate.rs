//! Color-vision deficiency simulation.
//!
//! Each deficiency is a 4x5 row-major affine matrix over normalized RGBA
//! (the layout SVG `feColorMatrix` uses). Only the RGB rows are applied;
//! column 4 is the bias term. Results are clamped to `[0, 1]` before being
//! rounded back to 8-bit channels.

use std::fmt;
use std::str::FromStr;

use huekit_color::Color;
use serde::{Deserialize, Serialize};

/// A 4x5 row-major color matrix.
pub type ColorMatrix = [f64; 20];

#[rustfmt::skip]
const PROTANOPIA: ColorMatrix = [
    0.567, 0.433, 0.0,   0.0, 0.0,
    0.558, 0.442, 0.0,   0.0, 0.0,
    0.0,   0.242, 0.758, 0.0, 0.0,
    0.0,   0.0,   0.0,   1.0, 0.0,
];

#[rustfmt::skip]
const PROTANOMALY: ColorMatrix = [
    0.817, 0.183, 0.0,   0.0, 0.0,
    0.333, 0.667, 0.0,   0.0, 0.0,
    0.0,   0.125, 0.875, 0.0, 0.0,
    0.0,   0.0,   0.0,   1.0, 0.0,
];

#[rustfmt::skip]
const DEUTERANOPIA: ColorMatrix = [
    0.625, 0.375, 0.0, 0.0, 0.0,
    0.7,   0.3,   0.0, 0.0, 0.0,
    0.0,   0.3,   0.7, 0.0, 0.0,
    0.0,   0.0,   0.0, 1.0, 0.0,
];

#[rustfmt::skip]
const DEUTERANOMALY: ColorMatrix = [
    0.8,   0.2,   0.0,   0.0, 0.0,
    0.258, 0.742, 0.0,   0.0, 0.0,
    0.0,   0.142, 0.858, 0.0, 0.0,
    0.0,   0.0,   0.0,   1.0, 0.0,
];

#[rustfmt::skip]
const TRITANOPIA: ColorMatrix = [
    0.95, 0.05,  0.0,   0.0, 0.0,
    0.0,  0.433, 0.567, 0.0, 0.0,
    0.0,  0.475, 0.525, 0.0, 0.0,
    0.0,  0.0,   0.0,   1.0, 0.0,
];

#[rustfmt::skip]
const TRITANOMALY: ColorMatrix = [
    0.967, 0.033, 0.0,   0.0, 0.0,
    0.0,   0.733, 0.267, 0.0, 0.0,
    0.0,   0.183, 0.817, 0.0, 0.0,
    0.0,   0.0,   0.0,   1.0, 0.0,
];

#[rustfmt::skip]
const ACHROMATOPSIA: ColorMatrix = [
    0.299, 0.587, 0.114, 0.0, 0.0,
    0.299, 0.587, 0.114, 0.0, 0.0,
    0.299, 0.587, 0.114, 0.0, 0.0,
    0.0,   0.0,   0.0,   1.0, 0.0,
];

#[rustfmt::skip]
const ACHROMATOMALY: ColorMatrix = [
    0.618, 0.320, 0.062, 0.0, 0.0,
    0.163, 0.775, 0.062, 0.0, 0.0,
    0.163, 0.320, 0.516, 0.0, 0.0,
    0.0,   0.0,   0.0,   1.0, 0.0,
];

/// Simulated color-vision deficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisionDeficiency {
    Protanopia,
    Deuteranopia,
    Tritanopia,
    Achromatopsia,
    Protanomaly,
    Deuteranomaly,
    Tritanomaly,
    Achromatomaly,
}

impl VisionDeficiency {
    pub const ALL: [VisionDeficiency; 8] = [
        Self::Protanopia,
        Self::Deuteranopia,
        Self::Tritanopia,
        Self::Achromatopsia,
        Self::Protanomaly,
        Self::Deuteranomaly,
        Self::Tritanomaly,
        Self::Achromatomaly,
    ];

    #[must_use]
    pub const fn matrix(self) -> &'static ColorMatrix {
        match self {
            Self::Protanopia => &PROTANOPIA,
            Self::Deuteranopia => &DEUTERANOPIA,
            Self::Tritanopia => &TRITANOPIA,
            Self::Achromatopsia => &ACHROMATOPSIA,
            Self::Protanomaly => &PROTANOMALY,
            Self::Deuteranomaly => &DEUTERANOMALY,
            Self::Tritanomaly => &TRITANOMALY,
            Self::Achromatomaly => &ACHROMATOMALY,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Protanopia => "protanopia",
            Self::Deuteranopia => "deuteranopia",
            Self::Tritanopia => "tritanopia",
            Self::Achromatopsia => "achromatopsia",
            Self::Protanomaly => "protanomaly",
            Self::Deuteranomaly => "deuteranomaly",
            Self::Tritanomaly => "tritanomaly",
            Self::Achromatomaly => "achromatomaly",
        }
    }

    #[must_use]
    pub fn simulate(self, color: Color) -> Color {
        apply_color_matrix(color, self.matrix())
    }
}

impl fmt::Display for VisionDeficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisionDeficiency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| format!("unknown vision deficiency {wanted:?}"))
    }
}

/// Apply a 4x5 affine matrix to one color.
#[must_use]
pub fn apply_color_matrix(color: Color, matrix: &ColorMatrix) -> Color {
    let input = [
        f64::from(color.r()) / 255.0,
        f64::from(color.g()) / 255.0,
        f64::from(color.b()) / 255.0,
    ];
    let row = |i: usize| {
        let m = &matrix[i * 5..i * 5 + 5];
        (m[0] * input[0] + m[1] * input[1] + m[2] * input[2] + m[4]).clamp(0.0, 1.0)
    };
    Color::from_unit(row(0), row(1), row(2))
}

/// Simulate every color not accepted by `is_locked`.
pub fn simulate_palette(
    palette: &[Color],
    deficiency: VisionDeficiency,
    is_locked: impl Fn(&Color) -> bool,
) -> Vec<Color> {
    palette
        .iter()
        .map(|c| if is_locked(c) { *c } else { deficiency.simulate(*c) })
        .collect()
}
