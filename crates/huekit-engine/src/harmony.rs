//! Harmony-based palette generation.
//!
//! Generation runs in four passes:
//!
//! 1. **Construct** a set of hues around a base color from a color-wheel
//!    rule (complement sweep, analogous band, triad, ...), base first.
//! 2. **Fill** up to the requested count by spinning and lightening
//!    earlier members, then truncate to exactly `count`.
//! 3. **Balance** every position toward a target lightness (light to dark)
//!    and a shuffled target saturation, each with a little jitter.
//! 4. **Preserve locks**: when a previous palette and a lock set are given,
//!    locked colors stay at their old positions and the fresh colors fill
//!    the gaps in order.
//!
//! All randomness comes from the caller's [`Rng`], so a seeded generator
//! makes the whole pipeline reproducible.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use huekit_color::{Color, Hsl};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::palette::clamp_count;

/// Chance of drawing the base from [`PRIMARY_BASES`] instead of synthesizing one.
pub const PRIMARY_PROBABILITY: f64 = 0.3;

/// Culturally "primary" hues: red, orange, yellow, green, blue, purple, pink, brown.
pub const PRIMARY_BASES: [Color; 8] = [
    Color::from_u32(0xE53935),
    Color::from_u32(0xFB8C00),
    Color::from_u32(0xFDD835),
    Color::from_u32(0x43A047),
    Color::from_u32(0x1E88E5),
    Color::from_u32(0x8E24AA),
    Color::from_u32(0xD81B60),
    Color::from_u32(0x6D4C41),
];

const RANDOM_SATURATION: (f64, f64) = (0.5, 0.9);
const RANDOM_LIGHTNESS: (f64, f64) = (0.45, 0.65);

const LIGHTNESS_START: f64 = 0.95;
const LIGHTNESS_END: f64 = 0.15;
const SATURATION_START: f64 = 0.5;
const SATURATION_END: f64 = 0.9;
const JITTER: (f64, f64) = (0.9, 1.1);
// Keeps balanced colors off pure white/black, where the hue would be lost.
const LIGHTNESS_CLAMP: (f64, f64) = (0.1, 0.92);

const ANALOGOUS_STEP: f64 = 12.0;
/// Lightness band the non-base mono members are spread across.
const MONO_LIGHTNESS: (f64, f64) = (0.2, 0.8);
const MONO_MIN_SATURATION: f64 = 0.3;
const MONO_ACHROMATIC: f64 = 0.05;
const FILL_SPIN: f64 = 15.0;
const FILL_LIGHTEN: f64 = 8.0;

/// Color-wheel relationship used to build a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyMethod {
    /// Pick one of the concrete methods at random on every call.
    #[default]
    Auto,
    Mono,
    Analogous,
    Complement,
    SplitComplement,
    Triad,
    Tetrad,
}

impl HarmonyMethod {
    /// Every method except [`HarmonyMethod::Auto`].
    pub const CONCRETE: [HarmonyMethod; 6] = [
        Self::Mono,
        Self::Analogous,
        Self::Complement,
        Self::SplitComplement,
        Self::Triad,
        Self::Tetrad,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Mono => "mono",
            Self::Analogous => "analogous",
            Self::Complement => "complement",
            Self::SplitComplement => "split-complement",
            Self::Triad => "triad",
            Self::Tetrad => "tetrad",
        }
    }

    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Replace `Auto` with a uniformly chosen concrete method.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        if self.is_auto() {
            Self::CONCRETE[rng.random_range(0..Self::CONCRETE.len())]
        } else {
            self
        }
    }
}

impl fmt::Display for HarmonyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HarmonyMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "auto" => Ok(Self::Auto),
            "mono" | "monochromatic" => Ok(Self::Mono),
            "analogous" => Ok(Self::Analogous),
            "complement" | "complementary" => Ok(Self::Complement),
            "split-complement" | "splitcomplement" | "split-complementary" => {
                Ok(Self::SplitComplement)
            }
            "triad" | "triadic" => Ok(Self::Triad),
            "tetrad" | "tetradic" => Ok(Self::Tetrad),
            other => Err(format!("unknown harmony method {other:?}")),
        }
    }
}

/// Inputs to [`generate`].
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    /// Requested length, clamped to the legal palette range.
    pub count: usize,
    pub method: HarmonyMethod,
    /// Explicit base; random when `None`.
    pub base: Option<Color>,
    pub locked: Option<&'a BTreeSet<Color>>,
    /// Palette whose locked positions must survive.
    pub previous: Option<&'a [Color]>,
}

impl<'a> GenerateRequest<'a> {
    #[must_use]
    pub fn new(count: usize, method: HarmonyMethod) -> Self {
        Self {
            count,
            method,
            base: None,
            locked: None,
            previous: None,
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: Option<Color>) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn with_locks(mut self, locked: &'a BTreeSet<Color>, previous: &'a [Color]) -> Self {
        self.locked = Some(locked);
        self.previous = Some(previous);
        self
    }
}

/// Output of [`generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub palette: Vec<Color>,
    pub brand_color: Color,
    /// Concrete method actually used (never `Auto`).
    pub method: HarmonyMethod,
}

/// Generate a balanced palette.
pub fn generate<R: Rng + ?Sized>(request: &GenerateRequest<'_>, rng: &mut R) -> Generated {
    let count = clamp_count(request.count);
    let method = request.method.resolve(rng);
    let base = request.base.unwrap_or_else(|| random_base(rng));

    let mut colors = construct(method, base, count);
    fill_to_count(&mut colors, count);

    let anchor_base = request.base.is_some() && !request.method.is_auto();
    balance(&mut colors, anchor_base, rng);
    if request.method.is_auto() {
        colors.shuffle(rng);
    }

    let palette = match (request.locked, request.previous) {
        (Some(locked), Some(previous)) if !locked.is_empty() => {
            preserve_locked(previous, locked, &colors, count)
        }
        _ => colors,
    };

    let brand_color = nominate_brand(request.base, &palette, request.locked);

    tracing::debug!(
        target: "huekit.harmony",
        count,
        requested = %request.method,
        method = %method,
        base = %base,
        brand = %brand_color,
        "palette generated"
    );

    Generated {
        palette,
        brand_color,
        method,
    }
}

/// Random base color: a primary hue some of the time, otherwise a
/// synthesized mid-high saturation, mid lightness color.
pub fn random_base<R: Rng + ?Sized>(rng: &mut R) -> Color {
    if rng.random_bool(PRIMARY_PROBABILITY) {
        PRIMARY_BASES[rng.random_range(0..PRIMARY_BASES.len())]
    } else {
        random_vivid(rng)
    }
}

/// Synthesized random color biased away from dull and extreme values.
pub fn random_vivid<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::from_hsl(Hsl::new(
        rng.random_range(0.0..360.0),
        rng.random_range(RANDOM_SATURATION.0..=RANDOM_SATURATION.1),
        rng.random_range(RANDOM_LIGHTNESS.0..=RANDOM_LIGHTNESS.1),
    ))
}

/// Initial harmony set, base first.
fn construct(method: HarmonyMethod, base: Color, count: usize) -> Vec<Color> {
    match method {
        HarmonyMethod::Mono => {
            let Hsl { h, s, .. } = base.to_hsl();
            // Chromatic members need enough chroma to round-trip the hue
            // through 8-bit channels.
            let s = if s < MONO_ACHROMATIC {
                s
            } else {
                s.max(MONO_MIN_SATURATION)
            };
            let span = count.max(2) as f64;
            std::iter::once(base)
                .chain((1..count).map(|i| {
                    let (low, high) = MONO_LIGHTNESS;
                    let l = low + (high - low) * i as f64 / span;
                    Color::from_hsl(Hsl::new(h, s, l))
                }))
                .collect()
        }
        HarmonyMethod::Analogous => (0..count)
            .map(|i| {
                // 0, +1, -1, +2, -2, ... steps around the base.
                let rank = i.div_ceil(2) as f64;
                let sign = if i % 2 == 1 { 1.0 } else { -1.0 };
                base.spin(sign * rank * ANALOGOUS_STEP)
            })
            .collect(),
        HarmonyMethod::Triad => spins(base, &[0.0, 120.0, 240.0]),
        HarmonyMethod::Tetrad => spins(base, &[0.0, 90.0, 180.0, 270.0]),
        HarmonyMethod::SplitComplement => spins(base, &[0.0, 150.0, 210.0]),
        HarmonyMethod::Complement | HarmonyMethod::Auto => {
            let span = (count.max(2) - 1) as f64;
            (0..count)
                .map(|i| base.spin(180.0 * i as f64 / span))
                .collect()
        }
    }
}

fn spins(base: Color, offsets: &[f64]) -> Vec<Color> {
    offsets.iter().map(|&deg| base.spin(deg)).collect()
}

/// Extend `colors` to `count` by spinning and lightening earlier members,
/// then truncate to exactly `count`.
fn fill_to_count(colors: &mut Vec<Color>, count: usize) {
    let seed_len = colors.len();
    if seed_len == 0 {
        return;
    }
    let mut slot = seed_len;
    while colors.len() < count {
        let round = (slot / seed_len) as f64;
        let source = colors[slot % seed_len];
        colors.push(source.spin(FILL_SPIN * round).lighten(FILL_LIGHTEN * round));
        slot += 1;
    }
    colors.truncate(count);
}

/// Rebalance lightness and saturation by position.
fn balance<R: Rng + ?Sized>(colors: &mut [Color], anchor_first: bool, rng: &mut R) {
    let n = colors.len();
    if n == 0 {
        return;
    }
    let span = (n.max(2) - 1) as f64;
    let mut saturations: Vec<f64> = (0..n)
        .map(|i| SATURATION_START + (SATURATION_END - SATURATION_START) * i as f64 / span)
        .collect();
    saturations.shuffle(rng);

    for (i, (color, target_s)) in colors.iter_mut().zip(saturations).enumerate() {
        let target_l = LIGHTNESS_START + (LIGHTNESS_END - LIGHTNESS_START) * i as f64 / span;
        let jitter_l = rng.random_range(JITTER.0..=JITTER.1);
        let jitter_s = rng.random_range(JITTER.0..=JITTER.1);
        if anchor_first && i == 0 {
            continue;
        }
        let hsl = color.to_hsl();
        let lightness = (target_l * jitter_l).clamp(LIGHTNESS_CLAMP.0, LIGHTNESS_CLAMP.1);
        *color = Color::from_hsl(Hsl::new(hsl.h, target_s * jitter_s, lightness));
    }
}

/// Rebuild a palette of `count` colors from `previous`, keeping every locked
/// color at its old position and filling the rest from `generated` in order.
#[must_use]
pub fn preserve_locked(
    previous: &[Color],
    locked: &BTreeSet<Color>,
    generated: &[Color],
    count: usize,
) -> Vec<Color> {
    if generated.is_empty() {
        return previous.iter().copied().take(count).collect();
    }
    let mut fresh = 0;
    (0..count)
        .map(|i| match previous.get(i) {
            Some(kept) if locked.contains(kept) => *kept,
            _ => {
                let next = generated[fresh % generated.len()];
                fresh += 1;
                next
            }
        })
        .collect()
}

/// The member with the highest HSL saturation.
#[must_use]
pub fn most_saturated(palette: &[Color]) -> Option<Color> {
    palette
        .iter()
        .copied()
        .max_by(|a, b| a.to_hsl().s.total_cmp(&b.to_hsl().s))
}

pub(crate) fn nominate_brand(
    explicit: Option<Color>,
    palette: &[Color],
    locked: Option<&BTreeSet<Color>>,
) -> Color {
    if let Some(base) = explicit {
        return base;
    }
    let is_locked = |c: &Color| locked.is_some_and(|set| set.contains(c));
    palette
        .iter()
        .copied()
        .find(|c| !is_locked(c))
        .or_else(|| most_saturated(palette))
        .unwrap_or(Color::BLACK)
}
