//! Engine configuration as data.
//!
//! Every tunable the palette session reads at startup lives in
//! [`EngineConfig`], loadable from TOML or JSON. Every field has a default,
//! so an empty document is a valid configuration.
//!
//! ```toml
//! # huekit.toml
//! default_brand_color = "#009FDB"
//! default_count = 6
//! default_method = "triad"
//! seed = 42
//! ```

use std::path::Path;

use huekit_color::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::harmony::HarmonyMethod;
use crate::palette::{MAX_PALETTE_SIZE, MIN_PALETTE_SIZE, ThemeMode};

/// Startup configuration for a palette session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Brand color the first palette is generated from.
    pub default_brand_color: Color,
    /// Palette length at session start.
    pub default_count: usize,
    /// Harmony method used by `regenerate` until changed.
    pub default_method: HarmonyMethod,
    /// Seed for the session RNG; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Maximum retained history snapshots (0 = unlimited).
    pub history_depth: usize,
    /// Largest RGB distance at which a reference name still applies.
    pub name_threshold: f64,
    /// Font family recorded in exported documents.
    pub font: String,
    pub theme: ThemeMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_brand_color: Color::from_u32(0x009FDB),
            default_count: 5,
            default_method: HarmonyMethod::Auto,
            seed: None,
            history_depth: 0,
            name_threshold: crate::naming::DEFAULT_NAME_THRESHOLD,
            font: "Inter".to_string(),
            theme: ThemeMode::Light,
        }
    }
}

impl EngineConfig {
    /// Same defaults with a fixed RNG seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format from its extension
    /// (`.json` is JSON, anything else TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(MIN_PALETTE_SIZE..=MAX_PALETTE_SIZE).contains(&self.default_count) {
            errors.push(format!(
                "default_count must be in {MIN_PALETTE_SIZE}..={MAX_PALETTE_SIZE}, got {}",
                self.default_count
            ));
        }

        if !self.name_threshold.is_finite() || self.name_threshold <= 0.0 {
            errors.push(format!(
                "name_threshold must be > 0, got {}",
                self.name_threshold
            ));
        }

        if self.font.trim().is_empty() {
            errors.push("font must not be empty".into());
        }

        errors
    }

    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            tracing::debug!(
                target: "huekit.config",
                count = self.default_count,
                method = %self.default_method,
                seeded = self.seed.is_some(),
                "engine config loaded"
            );
            Ok(self)
        } else {
            tracing::warn!(
                target: "huekit.config",
                errors = errors.len(),
                "engine config rejected"
            );
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
