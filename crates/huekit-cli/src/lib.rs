#![forbid(unsafe_code)]

//! Command-line front end for the huekit palette engine.
//!
//! # Commands
//!
//! - `generate`, `shades`, `gray`, `name`: one-shot generators over the engine
//! - `contrast`, `simulate`, `adjust`: per-color transforms and checks
//! - `analyze`: tags and contrast for a saved palette document
//! - `session`: replay a line-oriented script against a [`PaletteState`]
//!   and print the final document
//!
//! Every command accepts `--json` for machine-readable output. Logs go to
//! stderr, filtered by `HUEKIT_LOG`.
//!
//! [`PaletteState`]: huekit_engine::PaletteState

pub mod cli;
pub mod error;
pub mod logging;
pub mod session;

pub use cli::{Cli, Commands, Report, execute, run, run_from_env};
pub use error::{CliError, Result};
