//! Nearest-neighbor color naming.
//!
//! Names come from a static reference table (the CSS named colors). A color
//! takes the name of its closest entry by Euclidean RGB distance when that
//! distance is under the threshold; otherwise it falls back to a generic
//! label derived from its lightness.

use huekit_color::Color;

/// Largest RGB distance at which a reference name still applies.
pub const DEFAULT_NAME_THRESHOLD: f64 = 50.0;

const DARK_BELOW: f64 = 0.35;
const LIGHT_ABOVE: f64 = 0.65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedColor {
    pub name: &'static str,
    pub color: Color,
}

impl NamedColor {
    const fn new(name: &'static str, packed: u32) -> Self {
        Self {
            name,
            color: Color::from_u32(packed),
        }
    }
}

pub const REFERENCE_COLORS: &[NamedColor] = &[
    NamedColor::new("Alice Blue", 0xF0F8FF),
    NamedColor::new("Antique White", 0xFAEBD7),
    NamedColor::new("Aqua", 0x00FFFF),
    NamedColor::new("Aquamarine", 0x7FFFD4),
    NamedColor::new("Azure", 0xF0FFFF),
    NamedColor::new("Beige", 0xF5F5DC),
    NamedColor::new("Bisque", 0xFFE4C4),
    NamedColor::new("Black", 0x000000),
    NamedColor::new("Blanched Almond", 0xFFEBCD),
    NamedColor::new("Blue", 0x0000FF),
    NamedColor::new("Blue Violet", 0x8A2BE2),
    NamedColor::new("Brown", 0xA52A2A),
    NamedColor::new("Burly Wood", 0xDEB887),
    NamedColor::new("Cadet Blue", 0x5F9EA0),
    NamedColor::new("Chartreuse", 0x7FFF00),
    NamedColor::new("Chocolate", 0xD2691E),
    NamedColor::new("Coral", 0xFF7F50),
    NamedColor::new("Cornflower Blue", 0x6495ED),
    NamedColor::new("Cornsilk", 0xFFF8DC),
    NamedColor::new("Crimson", 0xDC143C),
    NamedColor::new("Dark Blue", 0x00008B),
    NamedColor::new("Dark Cyan", 0x008B8B),
    NamedColor::new("Dark Goldenrod", 0xB8860B),
    NamedColor::new("Dark Gray", 0xA9A9A9),
    NamedColor::new("Dark Green", 0x006400),
    NamedColor::new("Dark Khaki", 0xBDB76B),
    NamedColor::new("Dark Magenta", 0x8B008B),
    NamedColor::new("Dark Olive Green", 0x556B2F),
    NamedColor::new("Dark Orange", 0xFF8C00),
    NamedColor::new("Dark Orchid", 0x9932CC),
    NamedColor::new("Dark Red", 0x8B0000),
    NamedColor::new("Dark Salmon", 0xE9967A),
    NamedColor::new("Dark Sea Green", 0x8FBC8F),
    NamedColor::new("Dark Slate Blue", 0x483D8B),
    NamedColor::new("Dark Slate Gray", 0x2F4F4F),
    NamedColor::new("Dark Turquoise", 0x00CED1),
    NamedColor::new("Dark Violet", 0x9400D3),
    NamedColor::new("Deep Pink", 0xFF1493),
    NamedColor::new("Deep Sky Blue", 0x00BFFF),
    NamedColor::new("Dim Gray", 0x696969),
    NamedColor::new("Dodger Blue", 0x1E90FF),
    NamedColor::new("Fire Brick", 0xB22222),
    NamedColor::new("Floral White", 0xFFFAF0),
    NamedColor::new("Forest Green", 0x228B22),
    NamedColor::new("Gainsboro", 0xDCDCDC),
    NamedColor::new("Ghost White", 0xF8F8FF),
    NamedColor::new("Gold", 0xFFD700),
    NamedColor::new("Goldenrod", 0xDAA520),
    NamedColor::new("Gray", 0x808080),
    NamedColor::new("Green", 0x008000),
    NamedColor::new("Green Yellow", 0xADFF2F),
    NamedColor::new("Honeydew", 0xF0FFF0),
    NamedColor::new("Hot Pink", 0xFF69B4),
    NamedColor::new("Indian Red", 0xCD5C5C),
    NamedColor::new("Indigo", 0x4B0082),
    NamedColor::new("Ivory", 0xFFFFF0),
    NamedColor::new("Khaki", 0xF0E68C),
    NamedColor::new("Lavender", 0xE6E6FA),
    NamedColor::new("Lavender Blush", 0xFFF0F5),
    NamedColor::new("Lawn Green", 0x7CFC00),
    NamedColor::new("Lemon Chiffon", 0xFFFACD),
    NamedColor::new("Light Blue", 0xADD8E6),
    NamedColor::new("Light Coral", 0xF08080),
    NamedColor::new("Light Cyan", 0xE0FFFF),
    NamedColor::new("Light Goldenrod Yellow", 0xFAFAD2),
    NamedColor::new("Light Gray", 0xD3D3D3),
    NamedColor::new("Light Green", 0x90EE90),
    NamedColor::new("Light Pink", 0xFFB6C1),
    NamedColor::new("Light Salmon", 0xFFA07A),
    NamedColor::new("Light Sea Green", 0x20B2AA),
    NamedColor::new("Light Sky Blue", 0x87CEFA),
    NamedColor::new("Light Slate Gray", 0x778899),
    NamedColor::new("Light Steel Blue", 0xB0C4DE),
    NamedColor::new("Light Yellow", 0xFFFFE0),
    NamedColor::new("Lime", 0x00FF00),
    NamedColor::new("Lime Green", 0x32CD32),
    NamedColor::new("Linen", 0xFAF0E6),
    NamedColor::new("Maroon", 0x800000),
    NamedColor::new("Medium Aquamarine", 0x66CDAA),
    NamedColor::new("Medium Blue", 0x0000CD),
    NamedColor::new("Medium Orchid", 0xBA55D3),
    NamedColor::new("Medium Purple", 0x9370DB),
    NamedColor::new("Medium Sea Green", 0x3CB371),
    NamedColor::new("Medium Slate Blue", 0x7B68EE),
    NamedColor::new("Medium Spring Green", 0x00FA9A),
    NamedColor::new("Medium Turquoise", 0x48D1CC),
    NamedColor::new("Medium Violet Red", 0xC71585),
    NamedColor::new("Midnight Blue", 0x191970),
    NamedColor::new("Mint Cream", 0xF5FFFA),
    NamedColor::new("Misty Rose", 0xFFE4E1),
    NamedColor::new("Moccasin", 0xFFE4B5),
    NamedColor::new("Navajo White", 0xFFDEAD),
    NamedColor::new("Navy", 0x000080),
    NamedColor::new("Old Lace", 0xFDF5E6),
    NamedColor::new("Olive", 0x808000),
    NamedColor::new("Olive Drab", 0x6B8E23),
    NamedColor::new("Orange", 0xFFA500),
    NamedColor::new("Orange Red", 0xFF4500),
    NamedColor::new("Orchid", 0xDA70D6),
    NamedColor::new("Pale Goldenrod", 0xEEE8AA),
    NamedColor::new("Pale Green", 0x98FB98),
    NamedColor::new("Pale Turquoise", 0xAFEEEE),
    NamedColor::new("Pale Violet Red", 0xDB7093),
    NamedColor::new("Papaya Whip", 0xFFEFD5),
    NamedColor::new("Peach Puff", 0xFFDAB9),
    NamedColor::new("Peru", 0xCD853F),
    NamedColor::new("Pink", 0xFFC0CB),
    NamedColor::new("Plum", 0xDDA0DD),
    NamedColor::new("Powder Blue", 0xB0E0E6),
    NamedColor::new("Purple", 0x800080),
    NamedColor::new("Rebecca Purple", 0x663399),
    NamedColor::new("Red", 0xFF0000),
    NamedColor::new("Rosy Brown", 0xBC8F8F),
    NamedColor::new("Royal Blue", 0x4169E1),
    NamedColor::new("Saddle Brown", 0x8B4513),
    NamedColor::new("Salmon", 0xFA8072),
    NamedColor::new("Sandy Brown", 0xF4A460),
    NamedColor::new("Sea Green", 0x2E8B57),
    NamedColor::new("Seashell", 0xFFF5EE),
    NamedColor::new("Sienna", 0xA0522D),
    NamedColor::new("Silver", 0xC0C0C0),
    NamedColor::new("Sky Blue", 0x87CEEB),
    NamedColor::new("Slate Blue", 0x6A5ACD),
    NamedColor::new("Slate Gray", 0x708090),
    NamedColor::new("Snow", 0xFFFAFA),
    NamedColor::new("Spring Green", 0x00FF7F),
    NamedColor::new("Steel Blue", 0x4682B4),
    NamedColor::new("Tan", 0xD2B48C),
    NamedColor::new("Teal", 0x008080),
    NamedColor::new("Thistle", 0xD8BFD8),
    NamedColor::new("Tomato", 0xFF6347),
    NamedColor::new("Turquoise", 0x40E0D0),
    NamedColor::new("Violet", 0xEE82EE),
    NamedColor::new("Wheat", 0xF5DEB3),
    NamedColor::new("White", 0xFFFFFF),
    NamedColor::new("White Smoke", 0xF5F5F5),
    NamedColor::new("Yellow", 0xFFFF00),
    NamedColor::new("Yellow Green", 0x9ACD32),
];

/// Closest reference entry and its distance.
#[must_use]
pub fn nearest(color: Color) -> Option<(&'static NamedColor, f64)> {
    REFERENCE_COLORS
        .iter()
        .map(|entry| (entry, entry.color.distance(color)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Name for `color` using [`DEFAULT_NAME_THRESHOLD`].
#[must_use]
pub fn name_of(color: Color) -> &'static str {
    name_within(color, DEFAULT_NAME_THRESHOLD)
}

/// Name for `color`, accepting reference entries closer than `threshold`.
#[must_use]
pub fn name_within(color: Color, threshold: f64) -> &'static str {
    match nearest(color) {
        Some((entry, distance)) if distance < threshold => entry.name,
        _ => generic_label(color),
    }
}

/// Lightness-derived fallback label.
#[must_use]
pub fn generic_label(color: Color) -> &'static str {
    let lightness = color.to_hsl().l;
    if lightness < DARK_BELOW {
        "Dark"
    } else if lightness > LIGHT_ABOVE {
        "Light"
    } else {
        "Neutral"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_matches_use_table_name() {
        assert_eq!(name_of(Color::from_u32(0xFF0000)), "Red");
        assert_eq!(name_of(Color::from_u32(0x6495ED)), "Cornflower Blue");
        assert_eq!(name_of(Color::from_u32(0xDAA520)), "Goldenrod");
    }

    #[test]
    fn near_matches_snap_to_neighbor() {
        assert_eq!(name_of(Color::from_u32(0xFA0505)), "Red");
        let (entry, distance) = nearest(Color::from_u32(0x000001)).unwrap();
        assert_eq!(entry.name, "Black");
        assert_eq!(distance, 1.0);
    }

    #[test]
    fn far_colors_get_generic_labels() {
        // Nothing in the table is within a zero threshold of an off-table color.
        assert_eq!(name_within(Color::from_u32(0x111112), 0.5), "Dark");
        assert_eq!(name_within(Color::from_u32(0xEEEEEF), 0.5), "Light");
        assert_eq!(name_within(Color::from_u32(0x7F7F80), 0.5), "Neutral");
    }

    #[test]
    fn table_names_are_unique() {
        let mut names: Vec<_> = REFERENCE_COLORS.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), REFERENCE_COLORS.len());
    }
}
