#![forbid(unsafe_code)]

//! Palette generation and mutation engine for huekit.
//!
//! # Key Components
//!
//! - [`PaletteState`] - The session controller: palette, locks, previews, history
//! - [`generate`] - Harmony palette generation with balancing and lock preservation
//! - [`generate_shades`] - 20-step tint/shade ramps
//! - [`harmonize_gray`] - Brand-derived neutral gray
//! - [`Adjustments`] - Hue/saturation/brightness/temperature pipeline
//! - [`VisionDeficiency`] - Color-vision deficiency simulation
//! - [`name_of`] - Nearest reference color name
//! - [`History`] - Linear undo/redo of immutable snapshots
//!
//! # Role in huekit
//! `huekit-engine` sits between the color primitives in `huekit-color` and
//! whatever surface drives a session (the `huekit` CLI, or an editor). It is
//! synchronous and single-threaded; all randomness comes from a seedable RNG
//! owned by the session, and nothing here performs I/O except the explicit
//! file loaders on [`EngineConfig`] and [`PaletteDocument`].

pub mod adjust;
pub mod ai;
pub mod analysis;
pub mod config;
pub mod document;
pub mod error;
pub mod gray;
pub mod harmony;
pub mod history;
pub mod naming;
pub mod palette;
pub mod shades;
pub mod simulate;
pub mod state;
pub mod style;

pub use adjust::{Adjustments, apply_adjustments};
pub use ai::{AiRejection, PaletteSuggester, merge_ai_palette, merge_ai_palette_lenient};
pub use analysis::{HueFamily, PaletteTags, StyleTag, analyze};
pub use config::{ConfigError, EngineConfig};
pub use document::{MemoryStore, PaletteDocument, PaletteStore};
pub use error::{EngineError, Result};
pub use gray::harmonize_gray;
pub use harmony::{GenerateRequest, Generated, HarmonyMethod, generate};
pub use history::{History, HistoryConfig};
pub use naming::{name_of, name_within};
pub use palette::{MAX_PALETTE_SIZE, MIN_PALETTE_SIZE, ThemeMode};
pub use shades::{BASE_INDEX, SHADE_COUNT, SHADE_LABELS, generate_shades, generate_shades_hex};
pub use simulate::{VisionDeficiency, apply_color_matrix, simulate_palette};
pub use state::{HistoryEntry, Notification, NotificationLevel, PaletteState, SessionMode};
pub use style::{ContrastReport, StylePalette};

pub use huekit_color::Color;
