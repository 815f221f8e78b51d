//! Design-system roles derived from the brand and gray colors.
//!
//! A [`StylePalette`] is what the palette session ultimately feeds into a
//! style guide: both 20-step ramps plus a handful of semantic slots picked
//! from them for the current [`ThemeMode`]. [`ContrastReport`] scores every
//! swatch against white and black and checks the text/background pairs the
//! roles produce.

use huekit_color::{Color, WcagGrade, best_text_color, contrast_ratio};
use serde::Serialize;

use crate::palette::ThemeMode;
use crate::shades::{BASE_INDEX, SHADE_COUNT, generate_shades};

/// Semantic slots used by a generated style guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyleRoles {
    pub primary: Color,
    pub on_primary: Color,
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted_text: Color,
    pub border: Color,
}

/// Token naming one slot of [`StyleRoles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleToken {
    Primary,
    OnPrimary,
    Background,
    Surface,
    Text,
    MutedText,
    Border,
}

impl RoleToken {
    pub const ALL: [RoleToken; 7] = [
        Self::Primary,
        Self::OnPrimary,
        Self::Background,
        Self::Surface,
        Self::Text,
        Self::MutedText,
        Self::Border,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::OnPrimary => "on-primary",
            Self::Background => "background",
            Self::Surface => "surface",
            Self::Text => "text",
            Self::MutedText => "muted-text",
            Self::Border => "border",
        }
    }

    #[must_use]
    pub fn resolve_in(self, roles: &StyleRoles) -> Color {
        match self {
            Self::Primary => roles.primary,
            Self::OnPrimary => roles.on_primary,
            Self::Background => roles.background,
            Self::Surface => roles.surface,
            Self::Text => roles.text,
            Self::MutedText => roles.muted_text,
            Self::Border => roles.border,
        }
    }
}

/// Brand and gray ramps with theme roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylePalette {
    pub theme: ThemeMode,
    pub brand_scale: [Color; SHADE_COUNT],
    pub gray_scale: [Color; SHADE_COUNT],
    pub roles: StyleRoles,
}

impl StylePalette {
    #[must_use]
    pub fn derive(brand: Color, gray: Color, theme: ThemeMode) -> Self {
        let brand_scale = generate_shades(brand);
        let gray_scale = generate_shades(gray);
        let (background, surface, text, muted_text, border) = match theme {
            ThemeMode::Light => (
                gray_scale[19],
                gray_scale[18],
                gray_scale[0],
                gray_scale[5],
                gray_scale[16],
            ),
            ThemeMode::Dark => (
                gray_scale[0],
                gray_scale[1],
                gray_scale[19],
                gray_scale[14],
                gray_scale[3],
            ),
        };
        let primary = brand_scale[BASE_INDEX];
        let on_primary =
            best_text_color(primary, &[Color::WHITE, Color::BLACK]).unwrap_or(Color::WHITE);

        Self {
            theme,
            brand_scale,
            gray_scale,
            roles: StyleRoles {
                primary,
                on_primary,
                background,
                surface,
                text,
                muted_text,
                border,
            },
        }
    }

    #[must_use]
    pub fn role(&self, token: RoleToken) -> Color {
        token.resolve_in(&self.roles)
    }

    /// Score `palette` and this palette's text pairings.
    #[must_use]
    pub fn contrast_report(&self, palette: &[Color]) -> ContrastReport {
        ContrastReport {
            swatches: palette.iter().map(|c| SwatchContrast::of(*c)).collect(),
            text_on_background: ContrastScore::of(self.roles.text, self.roles.background),
            muted_on_background: ContrastScore::of(self.roles.muted_text, self.roles.background),
            on_primary: ContrastScore::of(self.roles.on_primary, self.roles.primary),
        }
    }
}

/// Contrast of one foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContrastScore {
    pub foreground: Color,
    pub background: Color,
    pub ratio: f64,
    pub grade: WcagGrade,
}

impl ContrastScore {
    #[must_use]
    pub fn of(foreground: Color, background: Color) -> Self {
        let ratio = contrast_ratio(foreground, background);
        Self {
            foreground,
            background,
            ratio,
            grade: WcagGrade::from_ratio(ratio),
        }
    }
}

/// A swatch scored as text on white and on black.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwatchContrast {
    pub color: Color,
    pub on_white: ContrastScore,
    pub on_black: ContrastScore,
    /// Whichever of white or black reads better on this swatch.
    pub best_text: Color,
}

impl SwatchContrast {
    #[must_use]
    pub fn of(color: Color) -> Self {
        Self {
            color,
            on_white: ContrastScore::of(color, Color::WHITE),
            on_black: ContrastScore::of(color, Color::BLACK),
            best_text: best_text_color(color, &[Color::WHITE, Color::BLACK])
                .unwrap_or(Color::BLACK),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastReport {
    pub swatches: Vec<SwatchContrast>,
    pub text_on_background: ContrastScore,
    pub muted_on_background: ContrastScore,
    pub on_primary: ContrastScore,
}

impl ContrastReport {
    /// Swatches that fail even the large-text threshold on both white and black.
    pub fn unreadable(&self) -> impl Iterator<Item = &SwatchContrast> {
        self.swatches.iter().filter(|s| {
            s.on_white.grade == WcagGrade::Fail && s.on_black.grade == WcagGrade::Fail
        })
    }
}
