//! Neutral companion colors for a brand color.
//!
//! The gray is never a pure gray: it carries a faint tint drawn from one of
//! three bucket hues picked by where the brand hue sits on the wheel, so the
//! neutral scale reads as belonging to the brand. Achromatic brands keep
//! their own hue to avoid drifting toward an unrelated tint.

use huekit_color::{Color, Hsl};
use rand::Rng;

/// Warm bucket, for reds, oranges and magentas.
pub const WARM_BUCKET_HUE: f64 = 30.0;
/// Default cool bucket, for yellows through cyans.
pub const COOL_BUCKET_HUE: f64 = 200.0;
/// Blue bucket, for blues and violets.
pub const BLUE_BUCKET_HUE: f64 = 220.0;

/// Brands below this saturation are treated as already neutral.
pub const NEAR_GRAY_SATURATION: f64 = 0.10;

const SATURATION_RANGE: (f64, f64) = (0.05, 0.15);
const LIGHTNESS_RANGE: (f64, f64) = (0.45, 0.55);

/// Bucket hue for a brand hue in degrees.
#[must_use]
pub fn bucket_hue(hue: f64) -> f64 {
    let hue = huekit_color::normalize_hue(hue);
    if hue > 330.0 || hue < 50.0 {
        WARM_BUCKET_HUE
    } else if hue > 200.0 && hue < 310.0 {
        BLUE_BUCKET_HUE
    } else {
        COOL_BUCKET_HUE
    }
}

/// Derive a neutral companion for `brand`, jittered by `rng`.
pub fn harmonize_gray<R: Rng + ?Sized>(brand: Color, rng: &mut R) -> Color {
    let hsl = brand.to_hsl();
    let lightness = rng.random_range(LIGHTNESS_RANGE.0..=LIGHTNESS_RANGE.1);

    if hsl.s < NEAR_GRAY_SATURATION {
        return Color::from_hsl(Hsl::new(hsl.h, hsl.s, lightness));
    }

    let saturation = rng.random_range(SATURATION_RANGE.0..=SATURATION_RANGE.1);
    Color::from_hsl(Hsl::new(bucket_hue(hsl.h), saturation, lightness))
}

#[cfg(test)]
mod tests {
    use super::*;
    use huekit_color::hue_distance;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn buckets_follow_hue_ranges() {
        assert_eq!(bucket_hue(0.0), WARM_BUCKET_HUE);
        assert_eq!(bucket_hue(49.0), WARM_BUCKET_HUE);
        assert_eq!(bucket_hue(345.0), WARM_BUCKET_HUE);
        assert_eq!(bucket_hue(50.0), COOL_BUCKET_HUE);
        assert_eq!(bucket_hue(200.0), COOL_BUCKET_HUE);
        assert_eq!(bucket_hue(201.0), BLUE_BUCKET_HUE);
        assert_eq!(bucket_hue(309.0), BLUE_BUCKET_HUE);
        assert_eq!(bucket_hue(310.0), COOL_BUCKET_HUE);
        assert_eq!(bucket_hue(330.0), COOL_BUCKET_HUE);
    }

    #[test]
    fn chromatic_brand_gets_low_saturation_mid_gray() {
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..100 {
            let gray = harmonize_gray(Color::from_u32(0xE53935), &mut rng);
            let hsl = gray.to_hsl();
            // 8-bit rounding moves saturation/lightness by well under a percent.
            assert!(hsl.s > 0.03 && hsl.s < 0.17, "saturation {}", hsl.s);
            assert!(hsl.l > 0.44 && hsl.l < 0.56, "lightness {}", hsl.l);
            assert!(hue_distance(hsl.h, WARM_BUCKET_HUE) < 15.0, "hue {}", hsl.h);
        }
    }

    #[test]
    fn near_gray_brand_keeps_its_hue() {
        let mut rng = SmallRng::seed_from_u64(2);
        let brand = Color::from_u32(0x6E7078);
        let gray = harmonize_gray(brand, &mut rng);
        let (brand_hsl, gray_hsl) = (brand.to_hsl(), gray.to_hsl());
        assert!(gray_hsl.s < NEAR_GRAY_SATURATION + 0.02);
        assert!(hue_distance(brand_hsl.h, gray_hsl.h) < 20.0);
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let brand = Color::from_u32(0x009FDB);
        let a = harmonize_gray(brand, &mut SmallRng::seed_from_u64(9));
        let b = harmonize_gray(brand, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
