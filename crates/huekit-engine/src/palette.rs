//! Palette bounds and small shared vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Fewest colors a palette may hold.
pub const MIN_PALETTE_SIZE: usize = 2;
/// Most colors a palette may hold.
pub const MAX_PALETTE_SIZE: usize = 20;

/// Clamp a requested color count onto the legal palette range.
#[must_use]
pub fn clamp_count(count: usize) -> usize {
    count.clamp(MIN_PALETTE_SIZE, MAX_PALETTE_SIZE)
}

/// Reject palettes whose length is outside the legal range.
pub fn check_len(len: usize) -> Result<()> {
    if len < MIN_PALETTE_SIZE {
        Err(EngineError::MinPaletteSize { len })
    } else if len > MAX_PALETTE_SIZE {
        Err(EngineError::MaxPaletteSize { len })
    } else {
        Ok(())
    }
}

/// Light or dark presentation of the design system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme {other:?} (expected light or dark)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_count_bounds() {
        assert_eq!(clamp_count(0), 2);
        assert_eq!(clamp_count(7), 7);
        assert_eq!(clamp_count(99), 20);
    }

    #[test]
    fn check_len_rejects_out_of_range() {
        assert!(matches!(check_len(1), Err(EngineError::MinPaletteSize { len: 1 })));
        assert!(matches!(check_len(21), Err(EngineError::MaxPaletteSize { len: 21 })));
        assert!(check_len(2).is_ok());
        assert!(check_len(20).is_ok());
    }

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Dark".parse::<ThemeMode>(), Ok(ThemeMode::Dark));
        assert!("dim".parse::<ThemeMode>().is_err());
        assert_eq!(ThemeMode::default().to_string(), "light");
    }
}
