//! The persisted palette document and the store it is saved to.
//!
//! ```json
//! {
//!   "brandColor": "#009FDB",
//!   "grayColor": "#7A8088",
//!   "font": "Inter",
//!   "theme": "light",
//!   "isGrayAuto": true,
//!   "explorerPalette": ["#009FDB", "#DB3C00"],
//!   "lockedColors": ["#009FDB"]
//! }
//! ```
//!
//! `font`, `theme`, `isGrayAuto` and `lockedColors` may be omitted.

use std::collections::BTreeSet;
use std::path::Path;

use huekit_color::Color;
use serde::{Deserialize, Serialize};

use crate::analysis::PaletteTags;
use crate::error::{EngineError, Result};
use crate::palette::{ThemeMode, check_len};

fn default_font() -> String {
    "Inter".to_string()
}

fn default_true() -> bool {
    true
}

/// Serializable snapshot of a design system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteDocument {
    pub brand_color: Color,
    pub gray_color: Color,
    #[serde(default = "default_font")]
    pub font: String,
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "default_true")]
    pub is_gray_auto: bool,
    pub explorer_palette: Vec<Color>,
    #[serde(default)]
    pub locked_colors: Vec<Color>,
}

impl PaletteDocument {
    pub fn from_json(s: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(s)?;
        doc.validate()?;
        Ok(doc)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the palette length against the legal range.
    pub fn validate(&self) -> Result<()> {
        check_len(self.explorer_palette.len())
            .map_err(|e| EngineError::document(format!("explorerPalette: {e}")))
    }

    /// Locked colors that actually appear in the palette.
    ///
    /// Entries naming colors outside the palette are dropped with a warning.
    #[must_use]
    pub fn locked_set(&self) -> BTreeSet<Color> {
        let mut locked = BTreeSet::new();
        for color in &self.locked_colors {
            if self.explorer_palette.contains(color) {
                locked.insert(*color);
            } else {
                tracing::warn!(
                    target: "huekit.state",
                    color = %color,
                    "locked color not in palette, dropping"
                );
            }
        }
        locked
    }
}

/// Where saved palettes go.
///
/// `existing_id` is the id of the last save in this session, if nothing has
/// changed since; a store may update that record instead of creating one.
pub trait PaletteStore {
    fn save(
        &mut self,
        existing_id: Option<&str>,
        document: &PaletteDocument,
        tags: &PaletteTags,
    ) -> std::result::Result<String, String>;
}

/// Store that keeps saved documents in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<(String, PaletteDocument, PaletteTags)>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<(&PaletteDocument, &PaletteTags)> {
        self.records
            .iter()
            .find(|(rid, _, _)| rid == id)
            .map(|(_, doc, tags)| (doc, tags))
    }
}

impl PaletteStore for MemoryStore {
    fn save(
        &mut self,
        existing_id: Option<&str>,
        document: &PaletteDocument,
        tags: &PaletteTags,
    ) -> std::result::Result<String, String> {
        let existing = existing_id
            .and_then(|id| self.records.iter_mut().find(|(rid, _, _)| rid == id));
        if let Some(record) = existing {
            record.1 = document.clone();
            record.2 = tags.clone();
            return Ok(record.0.clone());
        }
        let id = format!("palette-{}", self.records.len() + 1);
        self.records.push((id.clone(), document.clone(), tags.clone()));
        Ok(id)
    }
}
