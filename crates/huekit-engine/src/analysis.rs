//! Descriptive tags for a palette: dominant hue families and style labels.
//!
//! Tags are attached when a palette is saved so stored palettes can be
//! browsed by color and mood. They are heuristics over HSL, nothing more.

use std::fmt;

use huekit_color::{Color, Hsl, hue_distance};
use serde::{Deserialize, Serialize};

/// Share of the palette a family needs to count as primary.
pub const PRIMARY_SHARE: f64 = 0.25;
/// Most primary families reported.
pub const MAX_PRIMARY: usize = 3;

const BLACK_LIGHTNESS: f64 = 0.12;
const WHITE_LIGHTNESS: f64 = 0.93;
const GRAY_SATURATION: f64 = 0.12;

/// Coarse hue family of a single color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HueFamily {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    Brown,
    Gray,
    Black,
    White,
}

impl HueFamily {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Brown => "brown",
            Self::Gray => "gray",
            Self::Black => "black",
            Self::White => "white",
        }
    }

    /// Whether the family carries a hue at all.
    #[must_use]
    pub const fn is_chromatic(self) -> bool {
        !matches!(self, Self::Gray | Self::Black | Self::White)
    }

    #[must_use]
    pub fn of(color: Color) -> Self {
        let Hsl { h, s, l } = color.to_hsl();
        if l < BLACK_LIGHTNESS {
            return Self::Black;
        }
        if l > WHITE_LIGHTNESS {
            return Self::White;
        }
        if s < GRAY_SATURATION {
            return Self::Gray;
        }
        match h {
            h if (15.0..45.0).contains(&h) && l < 0.4 => Self::Brown,
            h if !(15.0..345.0).contains(&h) => Self::Red,
            h if h < 45.0 => Self::Orange,
            h if h < 70.0 => Self::Yellow,
            h if h < 165.0 => Self::Green,
            h if h < 195.0 => Self::Cyan,
            h if h < 255.0 => Self::Blue,
            h if h < 290.0 => Self::Purple,
            _ => Self::Pink,
        }
    }
}

impl fmt::Display for HueFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mood label for a whole palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleTag {
    Warm,
    Cold,
    Pastel,
    Vibrant,
    Monochromatic,
    Gradient,
}

impl StyleTag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::Cold => "cold",
            Self::Pastel => "pastel",
            Self::Vibrant => "vibrant",
            Self::Monochromatic => "monochromatic",
            Self::Gradient => "gradient",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags computed for a palette.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaletteTags {
    /// Most represented families, most frequent first.
    pub primary: Vec<HueFamily>,
    pub styles: Vec<StyleTag>,
}

/// Compute tags for `palette`.
#[must_use]
pub fn analyze(palette: &[Color]) -> PaletteTags {
    if palette.is_empty() {
        return PaletteTags::default();
    }
    let hsl: Vec<Hsl> = palette.iter().map(|c| c.to_hsl()).collect();
    let chromatic: Vec<Hsl> = palette
        .iter()
        .zip(&hsl)
        .filter(|(c, _)| HueFamily::of(**c).is_chromatic())
        .map(|(_, h)| *h)
        .collect();

    PaletteTags {
        primary: primary_families(palette),
        styles: style_tags(&hsl, &chromatic),
    }
}

fn primary_families(palette: &[Color]) -> Vec<HueFamily> {
    let mut counts: Vec<(HueFamily, usize)> = Vec::new();
    for family in palette.iter().map(|c| HueFamily::of(*c)) {
        match counts.iter_mut().find(|(f, _)| *f == family) {
            Some((_, n)) => *n += 1,
            None => counts.push((family, 1)),
        }
    }
    let threshold = palette.len() as f64 * PRIMARY_SHARE;
    // Stable sort keeps first-seen order among ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .filter(|(_, n)| *n as f64 >= threshold)
        .take(MAX_PRIMARY)
        .map(|(family, _)| family)
        .collect()
}

fn style_tags(all: &[Hsl], chromatic: &[Hsl]) -> Vec<StyleTag> {
    let mut tags = Vec::new();

    if !chromatic.is_empty() {
        let n = chromatic.len() as f64;
        let warm = chromatic.iter().filter(|c| is_warm_hue(c.h)).count() as f64;
        let cold = chromatic
            .iter()
            .filter(|c| (150.0..300.0).contains(&c.h))
            .count() as f64;
        if warm / n >= 0.6 {
            tags.push(StyleTag::Warm);
        } else if cold / n >= 0.6 {
            tags.push(StyleTag::Cold);
        }
    }

    let n = all.len() as f64;
    let mean_s = all.iter().map(|c| c.s).sum::<f64>() / n;
    let mean_l = all.iter().map(|c| c.l).sum::<f64>() / n;
    if mean_l >= 0.7 && mean_s >= 0.2 {
        tags.push(StyleTag::Pastel);
    } else if mean_s >= 0.7 && (0.35..=0.65).contains(&mean_l) {
        tags.push(StyleTag::Vibrant);
    }

    let monochromatic = match chromatic.first() {
        None => true,
        Some(first) => chromatic.iter().all(|c| hue_distance(first.h, c.h) <= 20.0),
    };
    if monochromatic && chromatic.len() != 1 {
        tags.push(StyleTag::Monochromatic);
    }

    if all.len() >= 3 && is_gradient(all) {
        tags.push(StyleTag::Gradient);
    }
    tags
}

fn is_warm_hue(h: f64) -> bool {
    h < 70.0 || h >= 300.0
}

fn is_gradient(all: &[Hsl]) -> bool {
    let rising = all.windows(2).all(|w| w[1].l > w[0].l);
    let falling = all.windows(2).all(|w| w[1].l < w[0].l);
    let smooth = all.windows(2).all(|w| hue_distance(w[0].h, w[1].h) <= 40.0);
    (rising || falling) && smooth
}
