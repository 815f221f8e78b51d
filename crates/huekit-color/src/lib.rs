#![forbid(unsafe_code)]

//! Color primitives for huekit.
//!
//! # Role in huekit
//! `huekit-color` is the shared vocabulary for colors. The palette engine
//! builds every scale, harmony, adjustment and simulation on top of the
//! conversions and channel operations defined here, and the CLI prints
//! these values directly.
//!
//! # This crate provides
//! - [`Color`], a canonical `#RRGGBB` value with strict parsing.
//! - [`Hsl`] and [`Hsv`] with lossless (to integer RGB) round-trips.
//! - Channel math: mix, spin, lighten/darken, saturate/desaturate.
//! - WCAG relative luminance, contrast ratio and grading.
//!
//! Nothing here is random or performs I/O.

/// The canonical color value and channel operations.
pub mod color;
/// WCAG luminance and contrast utilities.
pub mod contrast;
/// HSL/HSV color spaces.
pub mod space;

pub use color::{Color, ColorError};
pub use contrast::{
    WCAG_AA_LARGE_TEXT, WCAG_AA_NORMAL_TEXT, WCAG_AAA_LARGE_TEXT, WCAG_AAA_NORMAL_TEXT, WcagGrade,
    best_text_color, contrast_ratio, meets_wcag_aa, meets_wcag_aaa, relative_luminance,
    srgb_to_linear,
};
pub use space::{Hsl, Hsv, hue_distance, normalize_hue};
