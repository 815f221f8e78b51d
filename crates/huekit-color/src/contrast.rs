#![forbid(unsafe_code)]

//! WCAG 2.x relative luminance and contrast scoring.

use crate::Color;

/// Minimum ratio for normal text at level AA.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum ratio for large text at level AA.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;
/// Minimum ratio for normal text at level AAA.
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;
/// Minimum ratio for large text at level AAA.
pub const WCAG_AAA_LARGE_TEXT: f64 = 4.5;

/// Linearize one sRGB channel on `[0, 1]`.
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Relative luminance on `[0, 1]`.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let r = srgb_to_linear(f64::from(color.r()) / 255.0);
    let g = srgb_to_linear(f64::from(color.g()) / 255.0);
    let b = srgb_to_linear(f64::from(color.b()) / 255.0);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Contrast ratio on `[1, 21]`. Argument order does not matter.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let lum_a = relative_luminance(a);
    let lum_b = relative_luminance(b);
    let lighter = lum_a.max(lum_b);
    let darker = lum_a.min(lum_b);
    (lighter + 0.05) / (darker + 0.05)
}

#[must_use]
pub fn meets_wcag_aa(fg: Color, bg: Color) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AA_NORMAL_TEXT
}

#[must_use]
pub fn meets_wcag_aaa(fg: Color, bg: Color) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AAA_NORMAL_TEXT
}

/// Pick the candidate with the highest contrast against `bg`.
///
/// Ties keep the earlier candidate. Returns `None` for an empty slice.
#[must_use]
pub fn best_text_color(bg: Color, candidates: &[Color]) -> Option<Color> {
    let (&first, rest) = candidates.split_first()?;
    let mut best = first;
    let mut best_ratio = contrast_ratio(first, bg);
    for &candidate in rest {
        let ratio = contrast_ratio(candidate, bg);
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
    }
    Some(best)
}

/// Highest WCAG level a contrast ratio satisfies for normal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum WcagGrade {
    Fail,
    /// Passes only for large text (>= 3:1).
    AaLarge,
    Aa,
    Aaa,
}

impl WcagGrade {
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= WCAG_AAA_NORMAL_TEXT {
            Self::Aaa
        } else if ratio >= WCAG_AA_NORMAL_TEXT {
            Self::Aa
        } else if ratio >= WCAG_AA_LARGE_TEXT {
            Self::AaLarge
        } else {
            Self::Fail
        }
    }

    #[must_use]
    pub fn of(fg: Color, bg: Color) -> Self {
        Self::from_ratio(contrast_ratio(fg, bg))
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fail => "Fail",
            Self::AaLarge => "AA Large",
            Self::Aa => "AA",
            Self::Aaa => "AAA",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_on_white_is_maximal() {
        let ratio = contrast_ratio(Color::BLACK, Color::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
        assert_eq!(contrast_ratio(Color::WHITE, Color::WHITE), 1.0);
    }

    #[test]
    fn luminance_endpoints() {
        assert_eq!(relative_luminance(Color::BLACK), 0.0);
        assert!((relative_luminance(Color::WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(WcagGrade::from_ratio(21.0), WcagGrade::Aaa);
        assert_eq!(WcagGrade::from_ratio(7.0), WcagGrade::Aaa);
        assert_eq!(WcagGrade::from_ratio(4.5), WcagGrade::Aa);
        assert_eq!(WcagGrade::from_ratio(3.2), WcagGrade::AaLarge);
        assert_eq!(WcagGrade::from_ratio(1.5), WcagGrade::Fail);
        assert_eq!(WcagGrade::Aa.label(), "AA");
    }

    #[test]
    fn best_text_prefers_contrast() {
        let dark_bg = Color::rgb(20, 20, 30);
        assert_eq!(
            best_text_color(dark_bg, &[Color::BLACK, Color::WHITE]),
            Some(Color::WHITE)
        );
        assert_eq!(best_text_color(dark_bg, &[]), None);
    }

    #[test]
    fn aa_helpers_agree_with_ratio() {
        assert!(meets_wcag_aa(Color::BLACK, Color::WHITE));
        assert!(meets_wcag_aaa(Color::BLACK, Color::WHITE));
        assert!(!meets_wcag_aa(Color::rgb(150, 150, 150), Color::WHITE));
    }
}
