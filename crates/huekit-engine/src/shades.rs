//! Twenty-step tint/shade ramps.
//!
//! A ramp runs from darkest (index 0) to lightest (index 19):
//!
//! ```text
//! 0..=8    base mixed toward black, 90% .. 10%
//! 9        base, untouched
//! 10..=19  base mixed toward white, 9% .. 90%
//! ```

use huekit_color::Color;

/// Number of entries in every ramp.
pub const SHADE_COUNT: usize = 20;
/// Position of the unmodified base color.
pub const BASE_INDEX: usize = 9;

/// Source-terminology labels for each ramp position (T0 darkest .. T950 lightest).
pub const SHADE_LABELS: [&str; SHADE_COUNT] = [
    "T0", "T50", "T100", "T150", "T200", "T250", "T300", "T350", "T400", "T450", "T500", "T550",
    "T600", "T650", "T700", "T750", "T800", "T850", "T900", "T950",
];

const FALLBACK_GRAY: Color = Color::from_u32(0x808080);

/// Expand `base` into a 20-entry ramp.
#[must_use]
pub fn generate_shades(base: Color) -> [Color; SHADE_COUNT] {
    let mut ramp = [base; SHADE_COUNT];
    for (i, slot) in ramp.iter_mut().take(BASE_INDEX).enumerate() {
        let toward_black = 90.0 - 10.0 * i as f64;
        *slot = base.mix(Color::BLACK, toward_black);
    }
    for (i, slot) in ramp.iter_mut().skip(BASE_INDEX + 1).enumerate() {
        let toward_white = 9.0 * (i + 1) as f64;
        *slot = base.mix(Color::WHITE, toward_white);
    }
    ramp
}

/// Ramp for untrusted text; invalid input yields a flat gray ramp instead of failing.
#[must_use]
pub fn generate_shades_hex(base: &str) -> [Color; SHADE_COUNT] {
    match Color::parse(base) {
        Ok(color) => generate_shades(color),
        Err(_) => {
            tracing::debug!(target: "huekit.shades", input = base, "invalid base, using gray ramp");
            [FALLBACK_GRAY; SHADE_COUNT]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_has_twenty_entries_and_keeps_base() {
        let base = Color::from_u32(0x009FDB);
        let ramp = generate_shades(base);
        assert_eq!(ramp.len(), SHADE_COUNT);
        assert_eq!(ramp[BASE_INDEX], base);
    }

    #[test]
    fn ramp_ends_are_near_black_and_white() {
        let ramp = generate_shades(Color::from_u32(0xFF0000));
        assert_eq!(ramp[0], Color::rgb(26, 0, 0));
        assert_eq!(ramp[19], Color::rgb(255, 230, 230));
    }

    #[test]
    fn invalid_text_gives_flat_gray() {
        let ramp = generate_shades_hex("not a color");
        assert!(ramp.iter().all(|c| *c == FALLBACK_GRAY));
        assert_eq!(generate_shades_hex("#009fdb")[BASE_INDEX].to_hex(), "#009FDB");
    }

    #[test]
    fn labels_line_up_with_ramp() {
        assert_eq!(SHADE_LABELS[0], "T0");
        assert_eq!(SHADE_LABELS[BASE_INDEX], "T450");
        assert_eq!(SHADE_LABELS[SHADE_COUNT - 1], "T950");
    }
}
