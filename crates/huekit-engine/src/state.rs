#![forbid(unsafe_code)]

//! The palette session: one controller owning all mutable design state.
//!
//! [`PaletteState`] holds the authoritative palette, the locked-color set,
//! brand and gray colors, live adjustment parameters, an optional
//! color-vision preview, and the undo history. Every mutation goes through
//! a named method; committing methods append a [`HistoryEntry`].
//!
//! # Display pipeline
//!
//! ```text
//! palette ──▶ simulation preview? ──yes──▶ simulate(unlocked)
//!                    │
//!                    no
//!                    ▼
//!             adjustments(unlocked) ──▶ displayed palette
//! ```
//!
//! The displayed palette is a pure function of the authoritative palette,
//! the locked set, the adjustment parameters and the preview; it is never
//! stored.
//!
//! # Invariants
//!
//! 1. `MIN_PALETTE_SIZE <= palette.len() <= MAX_PALETTE_SIZE`.
//! 2. Every locked color is present in the palette.
//! 3. The history entry under the cursor equals [`PaletteState::snapshot`]
//!    whenever no rejected operation is pending.
//! 4. Rejected operations leave every field unchanged apart from the
//!    notification queue.

use std::collections::BTreeSet;
use std::fmt;

use huekit_color::Color;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adjust::Adjustments;
use crate::ai::{self, AiRejection, PaletteSuggester};
use crate::analysis::{self, PaletteTags};
use crate::config::EngineConfig;
use crate::document::{PaletteDocument, PaletteStore};
use crate::error::{EngineError, Result};
use crate::gray::harmonize_gray;
use crate::harmony::{self, GenerateRequest, HarmonyMethod};
use crate::history::{History, HistoryConfig};
use crate::naming;
use crate::palette::{MAX_PALETTE_SIZE, MIN_PALETTE_SIZE, ThemeMode};
use crate::shades::{SHADE_COUNT, generate_shades};
use crate::simulate::{VisionDeficiency, simulate_palette};
use crate::style::StylePalette;

/// Degrees the last color is spun by when inserting after it.
pub const INSERT_SPIN: f64 = 30.0;

/// Immutable snapshot stored in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub brand_color: Color,
    pub gray_color: Color,
    pub palette: Vec<Color>,
    pub locked_colors: BTreeSet<Color>,
    pub is_gray_auto: bool,
}

/// What the session is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Displayed palette equals the authoritative one.
    Idle,
    /// Non-identity adjustments are being previewed.
    Adjusting,
    /// A color-vision simulation is being previewed.
    Simulating(VisionDeficiency),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// User-facing message raised by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.message)
    }
}

/// Interactive palette session.
pub struct PaletteState {
    config: EngineConfig,
    rng: SmallRng,
    brand_color: Color,
    gray_color: Color,
    is_gray_auto: bool,
    palette: Vec<Color>,
    locked: BTreeSet<Color>,
    method: HarmonyMethod,
    adjustments: Adjustments,
    simulation: Option<VisionDeficiency>,
    font: String,
    theme: ThemeMode,
    history: History<HistoryEntry>,
    saved_palette_id: Option<String>,
    notifications: Vec<Notification>,
}

impl fmt::Debug for PaletteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaletteState")
            .field("brand_color", &self.brand_color)
            .field("gray_color", &self.gray_color)
            .field("is_gray_auto", &self.is_gray_auto)
            .field("palette", &self.palette)
            .field("locked", &self.locked)
            .field("method", &self.method)
            .field("mode", &self.mode())
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl Default for PaletteState {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl PaletteState {
    /// Start a session, seeding the RNG from `config.seed` or the OS.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    /// Start a session with a caller-supplied RNG.
    #[must_use]
    pub fn with_rng(config: EngineConfig, rng: SmallRng) -> Self {
        let history = History::new(HistoryConfig::new(config.history_depth));
        let mut state = Self {
            brand_color: config.default_brand_color,
            gray_color: config.default_brand_color,
            is_gray_auto: true,
            palette: Vec::new(),
            locked: BTreeSet::new(),
            method: config.default_method,
            adjustments: Adjustments::IDENTITY,
            simulation: None,
            font: config.font.clone(),
            theme: config.theme,
            history,
            saved_palette_id: None,
            notifications: Vec::new(),
            rng,
            config,
        };
        state.start_fresh();
        state.commit("session start");
        state
    }

    fn start_fresh(&mut self) {
        let request = GenerateRequest::new(self.config.default_count, self.method)
            .with_base(Some(self.config.default_brand_color));
        let generated = harmony::generate(&request, &mut self.rng);
        self.palette = generated.palette;
        self.brand_color = generated.brand_color;
        self.locked.clear();
        self.is_gray_auto = true;
        self.gray_color = harmonize_gray(self.brand_color, &mut self.rng);
        self.adjustments = Adjustments::IDENTITY;
        self.simulation = None;
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The committed palette, before adjustments or preview.
    #[must_use]
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// The palette as it should be shown right now.
    #[must_use]
    pub fn displayed_palette(&self) -> Vec<Color> {
        let is_locked = |c: &Color| self.locked.contains(c);
        match self.simulation {
            Some(deficiency) => simulate_palette(&self.palette, deficiency, is_locked),
            None => self.adjustments.apply_palette(&self.palette, is_locked),
        }
    }

    #[must_use]
    pub fn brand_color(&self) -> Color {
        self.brand_color
    }

    #[must_use]
    pub fn gray_color(&self) -> Color {
        self.gray_color
    }

    #[must_use]
    pub fn is_gray_auto(&self) -> bool {
        self.is_gray_auto
    }

    #[must_use]
    pub fn locked_colors(&self) -> &BTreeSet<Color> {
        &self.locked
    }

    #[must_use]
    pub fn is_locked(&self, color: Color) -> bool {
        self.locked.contains(&color)
    }

    #[must_use]
    pub fn method(&self) -> HarmonyMethod {
        self.method
    }

    #[must_use]
    pub fn adjustments(&self) -> Adjustments {
        self.adjustments
    }

    #[must_use]
    pub fn simulation(&self) -> Option<VisionDeficiency> {
        self.simulation
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        match self.simulation {
            Some(deficiency) => SessionMode::Simulating(deficiency),
            None if !self.adjustments.is_identity() => SessionMode::Adjusting,
            None => SessionMode::Idle,
        }
    }

    #[must_use]
    pub fn font(&self) -> &str {
        &self.font
    }

    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    /// The state as a history entry.
    #[must_use]
    pub fn snapshot(&self) -> HistoryEntry {
        HistoryEntry {
            brand_color: self.brand_color,
            gray_color: self.gray_color,
            palette: self.palette.clone(),
            locked_colors: self.locked.clone(),
            is_gray_auto: self.is_gray_auto,
        }
    }

    #[must_use]
    pub fn history(&self) -> &History<HistoryEntry> {
        &self.history
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn saved_palette_id(&self) -> Option<&str> {
        self.saved_palette_id.as_deref()
    }

    /// Drain pending notifications, oldest first.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    #[must_use]
    pub fn brand_shades(&self) -> [Color; SHADE_COUNT] {
        generate_shades(self.brand_color)
    }

    #[must_use]
    pub fn gray_shades(&self) -> [Color; SHADE_COUNT] {
        generate_shades(self.gray_color)
    }

    #[must_use]
    pub fn style_palette(&self) -> StylePalette {
        StylePalette::derive(self.brand_color, self.gray_color, self.theme)
    }

    /// Names for the displayed palette, using the configured threshold.
    #[must_use]
    pub fn color_names(&self) -> Vec<&'static str> {
        self.displayed_palette()
            .into_iter()
            .map(|c| naming::name_within(c, self.config.name_threshold))
            .collect()
    }

    #[must_use]
    pub fn tags(&self) -> PaletteTags {
        analysis::analyze(&self.palette)
    }

    // ====================================================================
    // Brand and gray
    // ====================================================================

    /// Set the brand color; an auto gray follows it.
    pub fn update_brand_color(&mut self, color: Color) {
        if color == self.brand_color {
            return;
        }
        self.brand_color = color;
        if self.is_gray_auto {
            self.gray_color = harmonize_gray(color, &mut self.rng);
        }
        self.commit("update brand color");
    }

    /// Parse and set the brand color. Invalid input leaves the previous
    /// brand color in place.
    pub fn update_brand_color_hex(&mut self, input: &str) -> Result<Color> {
        match Color::parse(input) {
            Ok(color) => {
                self.update_brand_color(color);
                Ok(color)
            }
            Err(e) => Err(self.reject(e.into())),
        }
    }

    /// Set the gray explicitly, decoupling it from the brand color.
    pub fn set_gray_color(&mut self, color: Color) {
        if color == self.gray_color && !self.is_gray_auto {
            return;
        }
        self.gray_color = color;
        self.is_gray_auto = false;
        self.commit("set gray color");
    }

    pub fn set_gray_color_hex(&mut self, input: &str) -> Result<Color> {
        match Color::parse(input) {
            Ok(color) => {
                self.set_gray_color(color);
                Ok(color)
            }
            Err(e) => Err(self.reject(e.into())),
        }
    }

    /// Switch gray between derived and manual. Turning auto on re-derives it.
    pub fn set_gray_auto(&mut self, auto: bool) {
        if auto == self.is_gray_auto {
            return;
        }
        self.is_gray_auto = auto;
        if auto {
            self.gray_color = harmonize_gray(self.brand_color, &mut self.rng);
        }
        self.commit("set gray auto");
    }

    // ====================================================================
    // Palette edits
    // ====================================================================

    /// Harmony method used by [`regenerate`](Self::regenerate).
    pub fn set_method(&mut self, method: HarmonyMethod) {
        self.method = method;
    }

    pub fn set_font(&mut self, font: impl Into<String>) {
        self.font = font.into();
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    /// Regenerate every unlocked position. Returns the nominated brand color.
    pub fn regenerate(&mut self, base: Option<Color>) -> Color {
        let generated = {
            let request = GenerateRequest::new(self.palette.len(), self.method)
                .with_base(base)
                .with_locks(&self.locked, &self.palette);
            harmony::generate(&request, &mut self.rng)
        };
        self.palette = generated.palette;
        self.brand_color = generated.brand_color;
        if self.is_gray_auto {
            self.gray_color = harmonize_gray(self.brand_color, &mut self.rng);
        }
        self.commit("regenerate");
        self.brand_color
    }

    /// Insert a new color after `at`: the midpoint of `at` and its right
    /// neighbor, or `at` spun by [`INSERT_SPIN`] when it is last.
    pub fn insert_color(&mut self, at: usize) -> Result<Color> {
        let len = self.palette.len();
        if len >= MAX_PALETTE_SIZE {
            return Err(self.reject(EngineError::MaxPaletteSize { len }));
        }
        let Some(&left) = self.palette.get(at) else {
            return Err(self.reject(EngineError::IndexOutOfRange { index: at, len }));
        };
        let inserted = match self.palette.get(at + 1) {
            Some(&right) => left.mix(right, 50.0),
            None => left.spin(INSERT_SPIN),
        };
        self.palette.insert(at + 1, inserted);
        self.commit("insert color");
        Ok(inserted)
    }

    /// Append several colors at once; all or nothing.
    pub fn append_colors(&mut self, colors: &[Color]) -> Result<()> {
        if colors.is_empty() {
            return Ok(());
        }
        let len = self.palette.len() + colors.len();
        if len > MAX_PALETTE_SIZE {
            return Err(self.reject(EngineError::MaxPaletteSize { len }));
        }
        self.palette.extend_from_slice(colors);
        self.commit("append colors");
        Ok(())
    }

    /// Remove the color at `at`. Its lock goes with it unless another
    /// position holds the same value.
    pub fn remove_color(&mut self, at: usize) -> Result<Color> {
        let len = self.palette.len();
        if len <= MIN_PALETTE_SIZE {
            return Err(self.reject(EngineError::MinPaletteSize { len }));
        }
        if at >= len {
            return Err(self.reject(EngineError::IndexOutOfRange { index: at, len }));
        }
        let removed = self.palette.remove(at);
        if !self.palette.contains(&removed) {
            self.locked.remove(&removed);
        }
        self.commit("remove color");
        Ok(removed)
    }

    /// Move the color at `from` to `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.palette.len();
        for index in [from, to] {
            if index >= len {
                return Err(self.reject(EngineError::IndexOutOfRange { index, len }));
            }
        }
        if from == to {
            return Ok(());
        }
        let color = self.palette.remove(from);
        self.palette.insert(to, color);
        self.commit("reorder");
        Ok(())
    }

    /// Overwrite the color at `at`; a lock on the old value moves to the new one.
    pub fn replace_color(&mut self, at: usize, color: Color) -> Result<()> {
        let len = self.palette.len();
        let Some(old) = self.palette.get(at).copied() else {
            return Err(self.reject(EngineError::IndexOutOfRange { index: at, len }));
        };
        if old == color {
            return Ok(());
        }
        self.palette[at] = color;
        if self.locked.remove(&old) {
            self.locked.insert(color);
        }
        self.commit("replace color");
        Ok(())
    }

    pub fn replace_color_hex(&mut self, at: usize, input: &str) -> Result<Color> {
        match Color::parse(input) {
            Ok(color) => self.replace_color(at, color).map(|()| color),
            Err(e) => Err(self.reject(e.into())),
        }
    }

    /// Flip the lock on `color`. Returns whether it is now locked.
    pub fn toggle_lock(&mut self, color: Color) -> Result<bool> {
        if !self.palette.contains(&color) {
            return Err(self.reject(EngineError::NotInPalette { color }));
        }
        let now_locked = if self.locked.remove(&color) {
            false
        } else {
            self.locked.insert(color);
            true
        };
        self.commit(if now_locked { "lock" } else { "unlock" });
        Ok(now_locked)
    }

    // ====================================================================
    // Previews
    // ====================================================================

    /// Replace the live adjustment parameters. Nothing is committed.
    pub fn set_adjustments(&mut self, adjustments: Adjustments) {
        self.adjustments = adjustments.clamped();
    }

    /// Fold the adjusted palette into the authoritative one.
    ///
    /// Fails with [`EngineError::NothingToCommit`] when the parameters are
    /// the identity.
    pub fn commit_adjustments(&mut self) -> Result<()> {
        if self.adjustments.is_identity() {
            return Err(EngineError::NothingToCommit);
        }
        let adjusted = self
            .adjustments
            .apply_palette(&self.palette, |c| self.locked.contains(c));
        self.replace_palette_remapping_locks(adjusted);
        self.adjustments = Adjustments::IDENTITY;
        self.commit("commit adjustments");
        Ok(())
    }

    /// Drop the preview and reset parameters to identity.
    pub fn cancel_adjustments(&mut self) {
        self.adjustments = Adjustments::IDENTITY;
    }

    pub fn start_simulation(&mut self, deficiency: VisionDeficiency) {
        self.simulation = Some(deficiency);
    }

    /// Make the simulated colors authoritative.
    pub fn commit_simulation(&mut self) -> Result<()> {
        let Some(deficiency) = self.simulation.take() else {
            return Err(EngineError::NothingToCommit);
        };
        let simulated = simulate_palette(&self.palette, deficiency, |c| self.locked.contains(c));
        self.replace_palette_remapping_locks(simulated);
        self.commit("commit simulation");
        Ok(())
    }

    pub fn cancel_simulation(&mut self) {
        self.simulation = None;
    }

    fn replace_palette_remapping_locks(&mut self, next: Vec<Color>) {
        for (old, new) in self.palette.iter().zip(&next) {
            if old != new && self.locked.remove(old) {
                self.locked.insert(*new);
            }
        }
        self.palette = next;
    }

    // ====================================================================
    // History
    // ====================================================================

    /// Step back one snapshot. Returns `false` at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(entry) => {
                self.restore(&entry);
                true
            }
            None => false,
        }
    }

    /// Step forward one snapshot. Returns `false` at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(entry) => {
                self.restore(&entry);
                true
            }
            None => false,
        }
    }

    /// Jump to snapshot `index`.
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        let len = self.history.len();
        match self.history.go_to(index) {
            Some(entry) => {
                self.restore(&entry);
                Ok(())
            }
            None => Err(self.reject(EngineError::IndexOutOfRange { index, len })),
        }
    }

    fn restore(&mut self, entry: &HistoryEntry) {
        self.brand_color = entry.brand_color;
        self.gray_color = entry.gray_color;
        self.palette.clone_from(&entry.palette);
        self.locked.clone_from(&entry.locked_colors);
        self.is_gray_auto = entry.is_gray_auto;
        self.simulation = None;
        tracing::debug!(
            target: "huekit.state",
            cursor = self.history.cursor(),
            len = self.history.len(),
            "history restored"
        );
    }

    // ====================================================================
    // Import, export, reset
    // ====================================================================

    #[must_use]
    pub fn export_document(&self) -> PaletteDocument {
        PaletteDocument {
            brand_color: self.brand_color,
            gray_color: self.gray_color,
            font: self.font.clone(),
            theme: self.theme,
            is_gray_auto: self.is_gray_auto,
            explorer_palette: self.palette.clone(),
            locked_colors: self.locked.iter().copied().collect(),
        }
    }

    /// Replace the whole design from a document.
    pub fn import_document(&mut self, document: &PaletteDocument) -> Result<()> {
        if let Err(e) = document.validate() {
            return Err(self.reject(e));
        }
        self.brand_color = document.brand_color;
        self.gray_color = document.gray_color;
        self.is_gray_auto = document.is_gray_auto;
        self.palette.clone_from(&document.explorer_palette);
        self.locked = document.locked_set();
        self.font.clone_from(&document.font);
        self.theme = document.theme;
        self.adjustments = Adjustments::IDENTITY;
        self.simulation = None;
        self.commit("import document");
        Ok(())
    }

    pub fn import_json(&mut self, json: &str) -> Result<()> {
        match PaletteDocument::from_json(json) {
            Ok(document) => self.import_document(&document),
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Start over from the configured defaults. History is kept.
    pub fn reset(&mut self) {
        self.method = self.config.default_method;
        self.font.clone_from(&self.config.font);
        self.theme = self.config.theme;
        self.start_fresh();
        self.commit("reset");
    }

    // ====================================================================
    // External collaborators
    // ====================================================================

    /// Merge a generated palette proposal, keeping locked positions.
    ///
    /// The whole proposal is discarded if it is not an array of exactly
    /// `palette().len()` valid colors.
    pub fn apply_ai_palette(&mut self, raw: &Value) -> Result<()> {
        let merged = match ai::merge_ai_palette(raw, &self.palette, &self.locked) {
            Ok(merged) => merged,
            Err(rejection) => return Err(self.reject(rejection.into())),
        };
        self.adopt_proposal(merged, "ai palette");
        Ok(())
    }

    /// Like [`apply_ai_palette`](Self::apply_ai_palette), but invalid
    /// entries are replaced with random colors instead of failing.
    pub fn apply_ai_palette_lenient(&mut self, raw: &Value) -> Result<()> {
        let merged =
            match ai::merge_ai_palette_lenient(raw, &self.palette, &self.locked, &mut self.rng) {
                Ok(merged) => merged,
                Err(rejection) => return Err(self.reject(rejection.into())),
            };
        self.adopt_proposal(merged, "ai palette");
        Ok(())
    }

    /// Ask `suggester` for a palette and merge it.
    pub fn suggest_with<S: PaletteSuggester + ?Sized>(
        &mut self,
        suggester: &mut S,
        prompt: &str,
    ) -> Result<()> {
        let count = self.palette.len();
        tracing::info!(target: "huekit.ai", count, prompt, "requesting palette");
        match suggester.suggest(prompt, count) {
            Ok(raw) => self.apply_ai_palette(&raw),
            Err(message) => Err(self.reject(AiRejection::ServiceFailure(message).into())),
        }
    }

    fn adopt_proposal(&mut self, palette: Vec<Color>, operation: &'static str) {
        self.brand_color = harmony::nominate_brand(None, &palette, Some(&self.locked));
        self.palette = palette;
        if self.is_gray_auto {
            self.gray_color = harmonize_gray(self.brand_color, &mut self.rng);
        }
        self.commit(operation);
    }

    /// Save the current design to `store`.
    ///
    /// A failed save is reported but never rolls anything back.
    pub fn save_with<S: PaletteStore + ?Sized>(&mut self, store: &mut S) -> Result<String> {
        let document = self.export_document();
        let tags = self.tags();
        match store.save(self.saved_palette_id.as_deref(), &document, &tags) {
            Ok(id) => {
                self.mark_saved(id.clone());
                self.notify(NotificationLevel::Info, format!("saved as {id}"));
                Ok(id)
            }
            Err(message) => Err(self.reject(EngineError::Persistence(message))),
        }
    }

    /// Record that the current state was persisted under `id`.
    pub fn mark_saved(&mut self, id: impl Into<String>) {
        self.saved_palette_id = Some(id.into());
    }

    // ====================================================================
    // Internals
    // ====================================================================

    fn commit(&mut self, operation: &'static str) {
        self.saved_palette_id = None;
        self.history.commit(self.snapshot());
        tracing::debug!(
            target: "huekit.state",
            operation,
            len = self.palette.len(),
            locked = self.locked.len(),
            brand = %self.brand_color,
            history = self.history.len(),
            "state committed"
        );
    }

    fn notify(&mut self, level: NotificationLevel, message: String) {
        self.notifications.push(Notification { level, message });
    }

    fn reject(&mut self, error: EngineError) -> EngineError {
        tracing::warn!(target: "huekit.state", error = %error, "operation rejected");
        self.notify(NotificationLevel::Warning, error.to_string());
        error
    }
}
