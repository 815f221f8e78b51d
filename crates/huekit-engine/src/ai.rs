//! Validation and merging of palettes proposed by a generative service.
//!
//! The service itself is outside the engine: anything implementing
//! [`PaletteSuggester`] can be plugged in. Whatever it returns is treated as
//! untrusted JSON. The strict path ([`parse_ai_palette`]) accepts only an
//! array of exactly `count` valid colors and rejects everything else as a
//! whole; the lenient path ([`parse_ai_palette_lenient`]) swaps invalid
//! entries for random colors instead.

use std::collections::BTreeSet;

use huekit_color::Color;
use rand::Rng;
use serde_json::Value;
use thiserror::Error;

use crate::harmony::random_vivid;

/// Why a proposed palette was discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiRejection {
    #[error("service failure: {0}")]
    ServiceFailure(String),
    #[error("response is not valid JSON: {0}")]
    Malformed(String),
    #[error("response is not an array")]
    NotAnArray,
    #[error("expected {expected} colors, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("entry {index} is not a valid color: {value}")]
    InvalidEntry { index: usize, value: String },
}

/// A source of candidate palettes for a free-text prompt.
///
/// Implementations return the raw JSON the service produced; validation is
/// the engine's job.
pub trait PaletteSuggester {
    fn suggest(&mut self, prompt: &str, count: usize) -> Result<Value, String>;
}

impl<F> PaletteSuggester for F
where
    F: FnMut(&str, usize) -> Result<Value, String>,
{
    fn suggest(&mut self, prompt: &str, count: usize) -> Result<Value, String> {
        self(prompt, count)
    }
}

/// Parse a raw response body.
pub fn parse_ai_response(body: &str, count: usize) -> Result<Vec<Color>, AiRejection> {
    let raw: Value =
        serde_json::from_str(body).map_err(|e| AiRejection::Malformed(e.to_string()))?;
    parse_ai_palette(&raw, count)
}

/// Strictly validate a proposed palette.
pub fn parse_ai_palette(raw: &Value, count: usize) -> Result<Vec<Color>, AiRejection> {
    let entries = checked_entries(raw, count)?;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .as_str()
                .and_then(|s| Color::parse(s).ok())
                .ok_or_else(|| AiRejection::InvalidEntry {
                    index,
                    value: entry.to_string(),
                })
        })
        .collect()
}

/// Validate shape and length, replacing invalid entries with random colors.
pub fn parse_ai_palette_lenient<R: Rng + ?Sized>(
    raw: &Value,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Color>, AiRejection> {
    let entries = checked_entries(raw, count)?;
    Ok(entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .and_then(|s| Color::parse(s).ok())
                .unwrap_or_else(|| random_vivid(rng))
        })
        .collect())
}

fn checked_entries(raw: &Value, count: usize) -> Result<&Vec<Value>, AiRejection> {
    let entries = raw.as_array().ok_or(AiRejection::NotAnArray)?;
    if entries.len() != count {
        return Err(AiRejection::WrongLength {
            expected: count,
            actual: entries.len(),
        });
    }
    Ok(entries)
}

/// Strictly validate a proposed replacement for `previous` and restore its
/// locked colors.
pub fn merge_ai_palette(
    raw: &Value,
    previous: &[Color],
    locked: &BTreeSet<Color>,
) -> Result<Vec<Color>, AiRejection> {
    let candidates = parse_ai_palette(raw, previous.len())?;
    Ok(merge_locked(&candidates, previous, locked))
}

/// [`merge_ai_palette`], substituting random colors for invalid entries.
pub fn merge_ai_palette_lenient<R: Rng + ?Sized>(
    raw: &Value,
    previous: &[Color],
    locked: &BTreeSet<Color>,
    rng: &mut R,
) -> Result<Vec<Color>, AiRejection> {
    let candidates = parse_ai_palette_lenient(raw, previous.len(), rng)?;
    Ok(merge_locked(&candidates, previous, locked))
}

/// Put locked colors back at their positions in `previous`; every other
/// position takes the candidate at the same index.
#[must_use]
pub fn merge_locked(
    candidates: &[Color],
    previous: &[Color],
    locked: &BTreeSet<Color>,
) -> Vec<Color> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| match previous.get(i) {
            Some(kept) if locked.contains(kept) => *kept,
            _ => *candidate,
        })
        .collect()
}
